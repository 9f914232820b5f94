mod return_form;

pub use return_form::{
    PageLayout, ReturnForm, ReturnFormPage, TextPlacement, COLUMN_HEADERS, COLUMN_X,
};
