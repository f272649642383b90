#![doc = include_str!(concat!("../", env!("CARGO_PKG_README")))]

pub mod config;
pub mod registry;
pub mod releases;
pub mod session;
pub mod storage;

pub use config::{default_config_path, default_data_dir, AppConfig, ConfigError};
pub use registry::{
    default_repositories, Disambiguate, IdentityPolicy, IdentityStrategy, NewRepository,
    Registry, RegistryError, RenameWithCounter, Repository,
};
pub use releases::{
    compile_filter, flatten_assets, latest_only, sort_releases, CommandInvoker, CommandSource,
    ConnectError, FeedAsset, FeedRelease, GitHubSource, InvokeError, Release, ReleaseResolver,
    ReleaseSort, ReleaseSource, ResolveError, SourceError,
};
pub use session::{CheckResult, CheckSummary, Session, SessionError};
pub use storage::{FileStorage, MemoryStorage, Storage, StorageError, STORAGE_KEY};
