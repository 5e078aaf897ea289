mod prescription;
mod translit;

pub use prescription::{render_prescription, DocumentError};
pub use translit::transliterate;
