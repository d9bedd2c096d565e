mod seed_manifest;

pub use seed_manifest::{ManifestError, SeedManifest};
