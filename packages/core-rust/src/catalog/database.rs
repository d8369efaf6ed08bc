//! Column constraints of the appliance database the forms write to.

use crate::validators::DateFormat;

/// Smallest `node.bandwidth_balance`.
pub const BANDWIDTH_BALANCE_MIN: u64 = 0;

/// Largest `node.bandwidth_balance` (unsigned 64-bit column).
pub const BANDWIDTH_BALANCE_MAX: u64 = u64::MAX;

/// Layout of `node.unregdate`.
pub const UNREGDATE_FORMAT: &str = "YYYY-MM-DD HH:mm:ss";

/// Columns of the `person` table, in table order.
pub const PERSON_COLUMNS: &[&str] = &[
    "pid",
    "firstname",
    "lastname",
    "email",
    "telephone",
    "company",
    "address",
    "notes",
    "sponsor",
    "anniversary",
    "birthday",
    "gender",
    "lang",
    "nickname",
    "cell_phone",
    "work_phone",
    "title",
    "building_number",
    "apartment_number",
    "room_number",
    "custom_field_1",
    "custom_field_2",
    "custom_field_3",
    "custom_field_4",
    "custom_field_5",
    "custom_field_6",
    "custom_field_7",
    "custom_field_8",
    "custom_field_9",
    "portal",
    "source",
    "psk",
    "potd",
];

/// [`UNREGDATE_FORMAT`] as a [`DateFormat`].
#[must_use]
pub fn unregdate_format() -> DateFormat {
    DateFormat::new(UNREGDATE_FORMAT)
}

/// Renders a byte count with a binary unit prefix and no decimals
/// (`1536` is `"2K"`, `u64::MAX` is `"16E"`).
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn bytes_to_human(bytes: u64) -> String {
    const UNITS: &[&str] = &["", "K", "M", "G", "T", "P", "E"];
    let mut size = bytes as f64;
    let mut unit = 0;
    while size >= 1024.0 && unit < UNITS.len() - 1 {
        size /= 1024.0;
        unit += 1;
    }
    format!("{size:.0}{}", UNITS[unit])
}
