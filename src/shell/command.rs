use std::str::FromStr;

use snafu::prelude::*;

use crate::filesystem::{self, FileSystem, FsError, ParsePermissionsError, Permissions};

use super::output::{ListingEntry, Output};

/// One script line, mapped onto a file system operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Mkdir { path: String },
    Append { path: String, content: String },
    Cat { path: String },
    Ls { path: String },
    Stat { path: String },
    Chmod { permissions: Permissions, path: String },
}

impl Command {
    pub fn execute(&self, fs: &mut FileSystem) -> Result<Output, FsError> {
        match self {
            Command::Mkdir { path } => fs.mkdir(path).map(|()| Output::Done),
            Command::Append { path, content } => {
                fs.add_content_to_file(path, content).map(|()| Output::Done)
            }
            Command::Cat { path } => fs
                .read_content_from_file(path)
                .map(|content| Output::Content(content.to_string())),
            Command::Ls { path } => {
                let entries = fs
                    .ls(path)?
                    .into_iter()
                    .map(|name| {
                        let child = filesystem::path::join(path, &name);
                        let node_type = fs.get_metadata(&child)?.node_type;
                        Ok(ListingEntry { name, node_type })
                    })
                    .collect::<Result<Vec<_>, FsError>>()?;
                Ok(Output::Listing(entries))
            }
            Command::Stat { path } => fs.get_metadata(path).map(Output::Metadata),
            Command::Chmod { permissions, path } => fs
                .set_permissions(path, *permissions)
                .map(|()| Output::Done),
        }
    }
}

impl FromStr for Command {
    type Err = CommandParseError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let (name, rest) = split_word(line);
        match name {
            "mkdir" => Ok(Command::Mkdir {
                path: single_path("mkdir", rest)?,
            }),
            "append" => {
                let (path, text) = split_word(rest);
                ensure!(
                    !path.is_empty(),
                    MissingArgumentSnafu {
                        command: "append",
                        argument: "path",
                    }
                );
                Ok(Command::Append {
                    path: path.to_string(),
                    content: unescape(text),
                })
            }
            "cat" => Ok(Command::Cat {
                path: single_path("cat", rest)?,
            }),
            "ls" => {
                let path = if rest.trim().is_empty() {
                    "/".to_string()
                } else {
                    single_path("ls", rest)?
                };
                Ok(Command::Ls { path })
            }
            "stat" => Ok(Command::Stat {
                path: single_path("stat", rest)?,
            }),
            "chmod" => {
                let (flags, rest) = split_word(rest);
                ensure!(
                    !flags.is_empty(),
                    MissingArgumentSnafu {
                        command: "chmod",
                        argument: "permissions",
                    }
                );
                Ok(Command::Chmod {
                    permissions: flags.parse().context(InvalidPermissionsSnafu)?,
                    path: single_path("chmod", rest)?,
                })
            }
            _ => UnknownCommandSnafu { name }.fail(),
        }
    }
}

/// Splits off the first whitespace-delimited word. The remainder starts right
/// after the single separating whitespace character.
fn split_word(input: &str) -> (&str, &str) {
    let input = input.trim_start();
    input
        .split_once(char::is_whitespace)
        .unwrap_or((input, ""))
}

fn single_path(command: &'static str, rest: &str) -> Result<String, CommandParseError> {
    let (path, extra) = split_word(rest);
    ensure!(
        !path.is_empty(),
        MissingArgumentSnafu {
            command,
            argument: "path",
        }
    );
    ensure!(
        extra.trim().is_empty(),
        UnexpectedArgumentSnafu {
            command,
            argument: extra.trim(),
        }
    );
    Ok(path.to_string())
}

/// Expands `\n`, `\t` and `\\`. Other backslashes are kept as written.
fn unescape(text: &str) -> String {
    let mut unescaped = String::with_capacity(text.len());
    let mut chars = text.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            unescaped.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => unescaped.push('\n'),
            Some('t') => unescaped.push('\t'),
            Some('\\') => unescaped.push('\\'),
            Some(other) => {
                unescaped.push('\\');
                unescaped.push(other);
            }
            None => unescaped.push('\\'),
        }
    }
    unescaped
}

#[derive(Debug, Snafu, PartialEq, Eq)]
pub enum CommandParseError {
    #[snafu(display("Unknown command '{}'", name))]
    UnknownCommand { name: String },
    #[snafu(display("'{}' is missing its {} argument", command, argument))]
    MissingArgument {
        command: &'static str,
        argument: &'static str,
    },
    #[snafu(display("'{}' got an unexpected argument '{}'", command, argument))]
    UnexpectedArgument {
        command: &'static str,
        argument: String,
    },
    #[snafu(display("Invalid chmod permissions"))]
    InvalidPermissions { source: ParsePermissionsError },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filesystem::NodeType;
    use rstest::*;

    fn parse(line: &str) -> Result<Command, CommandParseError> {
        line.parse()
    }

    #[rstest]
    #[case("mkdir /a/b/c", Command::Mkdir { path: "/a/b/c".into() })]
    #[case("  mkdir   /a  ", Command::Mkdir { path: "/a".into() })]
    #[case("cat /a/d.txt", Command::Cat { path: "/a/d.txt".into() })]
    #[case("ls", Command::Ls { path: "/".into() })]
    #[case("ls /a", Command::Ls { path: "/a".into() })]
    #[case("stat /", Command::Stat { path: "/".into() })]
    #[case("append /d.txt Hello, World!", Command::Append {
        path: "/d.txt".into(),
        content: "Hello, World!".into(),
    })]
    #[case("append /d.txt  two spaces", Command::Append {
        path: "/d.txt".into(),
        content: " two spaces".into(),
    })]
    #[case("append /d.txt", Command::Append {
        path: "/d.txt".into(),
        content: "".into(),
    })]
    #[case("chmod r-x /bin", Command::Chmod {
        permissions: Permissions { read: true, write: false, execute: true },
        path: "/bin".into(),
    })]
    fn test_parse_command(#[case] line: &str, #[case] expected: Command) {
        assert_eq!(parse(line), Ok(expected));
    }

    #[rstest]
    #[case("line one\\nline two", "line one\nline two")]
    #[case("col\\tcol", "col\tcol")]
    #[case("back\\\\slash", "back\\slash")]
    #[case("keep \\q as is", "keep \\q as is")]
    #[case("trailing\\", "trailing\\")]
    fn test_append_unescapes_content(#[case] raw: &str, #[case] expected: &str) {
        let command = parse(&format!("append /f {raw}")).unwrap();
        assert_eq!(
            command,
            Command::Append {
                path: "/f".into(),
                content: expected.into(),
            }
        );
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(
            parse("rm /a"),
            Err(CommandParseError::UnknownCommand { name: "rm".into() })
        );
        assert_eq!(
            parse("mkdir"),
            Err(CommandParseError::MissingArgument {
                command: "mkdir",
                argument: "path",
            })
        );
        assert_eq!(
            parse("append"),
            Err(CommandParseError::MissingArgument {
                command: "append",
                argument: "path",
            })
        );
        assert_eq!(
            parse("chmod"),
            Err(CommandParseError::MissingArgument {
                command: "chmod",
                argument: "permissions",
            })
        );
        assert_eq!(
            parse("chmod rw-"),
            Err(CommandParseError::MissingArgument {
                command: "chmod",
                argument: "path",
            })
        );
        assert_eq!(
            parse("cat /a /b"),
            Err(CommandParseError::UnexpectedArgument {
                command: "cat",
                argument: "/b".into(),
            })
        );
        assert!(matches!(
            parse("chmod rwz /a"),
            Err(CommandParseError::InvalidPermissions { .. })
        ));
    }

    #[test]
    fn test_execute_reference_scenario() {
        let mut fs = FileSystem::new();
        assert_eq!(
            parse("mkdir /a/b/c").unwrap().execute(&mut fs),
            Ok(Output::Done)
        );
        parse("append /a/b/c/d.txt Hello, World!")
            .unwrap()
            .execute(&mut fs)
            .unwrap();

        assert_eq!(
            parse("ls /a/b/c").unwrap().execute(&mut fs),
            Ok(Output::Listing(vec![ListingEntry {
                name: "d.txt".into(),
                node_type: NodeType::File,
            }]))
        );
        assert_eq!(
            parse("cat /a/b/c/d.txt").unwrap().execute(&mut fs),
            Ok(Output::Content("Hello, World!".into()))
        );
        match parse("stat /a/b/c/d.txt").unwrap().execute(&mut fs) {
            Ok(Output::Metadata(metadata)) => assert_eq!(metadata.size, 13),
            other => panic!("Expected metadata, got {:?}", other),
        }
    }

    #[test]
    fn test_execute_listing_reports_kinds() {
        let mut fs = FileSystem::new();
        fs.mkdir("/docs").unwrap();
        fs.add_content_to_file("/readme.md", "# hi").unwrap();
        assert_eq!(
            parse("ls").unwrap().execute(&mut fs),
            Ok(Output::Listing(vec![
                ListingEntry {
                    name: "docs".into(),
                    node_type: NodeType::Directory,
                },
                ListingEntry {
                    name: "readme.md".into(),
                    node_type: NodeType::File,
                },
            ]))
        );
    }

    #[test]
    fn test_execute_chmod_and_errors() {
        let mut fs = FileSystem::new();
        fs.add_content_to_file("/run.sh", "echo hi").unwrap();
        parse("chmod rwx /run.sh").unwrap().execute(&mut fs).unwrap();
        assert!(fs.get_metadata("/run.sh").unwrap().permissions.execute);

        assert_eq!(
            parse("ls /run.sh").unwrap().execute(&mut fs),
            Err(FsError::NotADirectory {
                path: "/run.sh".into()
            })
        );
        assert_eq!(
            parse("cat /").unwrap().execute(&mut fs),
            Err(FsError::NotAFile { path: "/".into() })
        );
    }
}
