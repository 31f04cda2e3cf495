pub(crate) mod blit;
pub(crate) mod interlace;
pub(crate) mod layout;
pub(crate) mod pipeline;
