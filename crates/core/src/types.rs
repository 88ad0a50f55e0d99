/// Post and user identifiers as handed to us by the host CMS.
pub type DbId = i64;
