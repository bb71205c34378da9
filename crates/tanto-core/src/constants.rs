/// Permission tokens accepted in `[[scope]].permission`.
pub const PERMISSION_TOKENS: [&str; 7] = [
    "read",
    "write",
    "delete",
    "create_file",
    "create_folder",
    "rename",
    "*",
];

/// Realm announced in `WWW-Authenticate` challenges.
pub const AUTH_REALM: &str = "tanto";

/// Environment variable naming the configuration file.
pub const CONFIG_PATH_ENV: &str = "TANTO_CONFIG";

/// Default configuration file, resolved relative to the working directory.
pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

/// Prefix for environment overrides (`TANTO__SERVER__PORT=9000`).
pub const ENV_PREFIX: &str = "TANTO";

/// Largest request body accepted by `PUT`.
pub const MAX_UPLOAD_BYTES: usize = 64 * 1024 * 1024;

/// Methods announced in the `Allow` header.
pub const ALLOWED_METHODS: &str = "OPTIONS, GET, HEAD, PUT, DELETE, MKCOL, MOVE";

/// `DAV` compliance classes announced by `OPTIONS`.
pub const DAV_COMPLIANCE: &str = "1";
