pub(crate) mod pacer;
