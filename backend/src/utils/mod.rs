pub mod error;
pub mod i18n;

pub use error::{ApiError, ApiResult};
pub use i18n::{extract_locale_from_header, get_locale, with_locale};
