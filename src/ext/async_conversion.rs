/// Async counterpart to the standard library's `TryFrom<T>` trait.
///
/// Used where building a value requires I/O, such as loading a manifest or a
/// script from the host filesystem.
pub trait AsyncTryFrom<T>: Sized {
    /// The error type that can occur during conversion.
    type Error;

    /// Performs the fallible asynchronous conversion from `T` to `Self`.
    async fn async_try_from(value: T) -> Result<Self, Self::Error>;
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Depth(usize);

    impl AsyncTryFrom<&str> for Depth {
        type Error = ();

        async fn async_try_from(path: &str) -> Result<Self, Self::Error> {
            if path.is_empty() {
                return Err(());
            }
            Ok(Depth(path.split('/').filter(|s| !s.is_empty()).count()))
        }
    }

    #[compio::test]
    async fn test_async_try_from_success() {
        let depth = Depth::async_try_from("/a/b/c").await.unwrap();
        assert_eq!(depth.0, 3);
    }

    #[compio::test]
    async fn test_async_try_from_failure() {
        assert!(Depth::async_try_from("").await.is_err());
    }
}
