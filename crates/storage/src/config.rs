/// Object storage configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    /// Custom endpoint for S3-compatible stores (MinIO, Garage). Unset means
    /// real AWS.
    pub endpoint: Option<String>,
    pub region: String,
    pub access_key_id: String,
    pub secret_access_key: String,
    /// Bucket holding the audio objects.
    pub audio_bucket: String,
    /// Lifetime of issued playback URLs, in seconds.
    pub play_url_ttl_secs: u64,
}

impl StorageConfig {
    /// Read storage settings from the environment.
    ///
    /// | Env Var                | Default       |
    /// |------------------------|---------------|
    /// | `S3_ENDPOINT`          | (unset)       |
    /// | `S3_REGION`            | `us-east-1`   |
    /// | `S3_ACCESS_KEY_ID`     | (required)    |
    /// | `S3_SECRET_ACCESS_KEY` | (required)    |
    /// | `AUDIO_BUCKET`         | `music-files` |
    /// | `PLAY_URL_TTL_SECS`    | `3600`        |
    pub fn from_env() -> Self {
        let endpoint = std::env::var("S3_ENDPOINT").ok();

        let region = std::env::var("S3_REGION").unwrap_or_else(|_| "us-east-1".into());

        let access_key_id =
            std::env::var("S3_ACCESS_KEY_ID").expect("S3_ACCESS_KEY_ID must be set");

        let secret_access_key =
            std::env::var("S3_SECRET_ACCESS_KEY").expect("S3_SECRET_ACCESS_KEY must be set");

        let audio_bucket = std::env::var("AUDIO_BUCKET").unwrap_or_else(|_| "music-files".into());

        let play_url_ttl_secs: u64 = std::env::var("PLAY_URL_TTL_SECS")
            .unwrap_or_else(|_| "3600".into())
            .parse()
            .expect("PLAY_URL_TTL_SECS must be a valid u64");

        Self {
            endpoint,
            region,
            access_key_id,
            secret_access_key,
            audio_bucket,
            play_url_ttl_secs,
        }
    }
}
