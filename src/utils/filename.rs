use chrono::{Datelike, Local};
use std::path::PathBuf;

/// Generate default view export filename with format: solaris-{view}-{YYMMDD}.json
pub fn generate_default_output_filename(view_slug: &str) -> PathBuf {
    let now = Local::now();
    let year = now.year() % 100;
    let month = now.month();
    let day = now.day();

    let filename = format!(
        "solaris-{}-{:02}{:02}{:02}.json",
        view_slug, year, month, day
    );
    PathBuf::from("output").join(filename)
}
