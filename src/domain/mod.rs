//! Domain records and shared value formats.

pub mod entities;

use time::format_description::BorrowedFormatItem;
use time::macros::format_description;

/// Wire format for calendar dates (`1980-10-10`).
pub const DATE_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day]");

time::serde::format_description!(pub date_format, Date, DATE_FORMAT);
