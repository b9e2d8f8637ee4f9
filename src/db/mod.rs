pub mod postgres;
pub mod recommendations;
pub mod redis;
pub mod videos;

pub use postgres::create_pool;
pub use recommendations::PgRecommendationStore;
pub use redis::create_redis_client;
pub use redis::Cache;
pub use redis::CacheKey;
pub use videos::PgVideoCatalog;
