pub(crate) mod fingerprint;
pub(crate) mod schedule;
pub(crate) mod timeline;
