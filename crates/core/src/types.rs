/// Slide identifiers are opaque strings of the form `slide-<n>`.
pub type SlideId = String;

/// Prefix carried by every allocated slide id.
pub const SLIDE_ID_PREFIX: &str = "slide-";
