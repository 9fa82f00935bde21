mod support;
mod ttl_lru_cache;
