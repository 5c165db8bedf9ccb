//! Wire format of the quiz form.

mod fields;
mod integrity;

pub use fields::{
    encode_options, split_options, Field, FormFields, HiddenFields, MAX_QUESTIONS,
};
pub use integrity::SigningKey;
