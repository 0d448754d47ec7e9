pub(crate) mod hook;
pub(crate) mod keyword;
pub(crate) mod kpis;
pub(crate) mod prospects;
pub(crate) mod rankings;
