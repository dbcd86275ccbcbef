use chrono::NaiveDate;

use crate::{error::AppError, models::trip::Trip};

pub const EXPORT_PREFIX: &str = "atlas-trips";

pub fn export_document(trips: &[Trip]) -> Result<Vec<u8>, AppError> {
    Ok(serde_json::to_vec_pretty(trips)?)
}

pub fn export_filename(day: NaiveDate) -> String {
    format!("{EXPORT_PREFIX}-{}.json", day.format("%Y-%m-%d"))
}

/// Parses an import file. Only the JSON shape is checked: the document must be
/// an array of trip-shaped objects. Unknown modes and empty dates pass through.
pub fn parse_import(raw: &[u8]) -> Result<Vec<Trip>, AppError> {
    Ok(serde_json::from_slice(raw)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filename_carries_the_date() {
        let day = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        assert_eq!(export_filename(day), "atlas-trips-2024-05-01.json");
    }

    #[test]
    fn export_is_pretty_printed() {
        let doc = export_document(&[]).unwrap();
        assert_eq!(doc, b"[]");

        let raw = br#"[{"id":"a","startCoords":[0,0],"endCoords":[1,0],"mode":"walk","date":"2024-05-01T00:00:00.000Z","notes":"","distance":111.19492664455873}]"#;
        let trips = parse_import(raw).unwrap();
        let doc = String::from_utf8(export_document(&trips).unwrap()).unwrap();
        assert!(doc.contains("\n  {\n    \"id\": \"a\""), "{doc}");
    }

    #[test]
    fn rejects_non_json_and_non_arrays() {
        assert!(matches!(parse_import(b"not json"), Err(AppError::Json(_))));
        assert!(matches!(parse_import(br#"{"id":"a"}"#), Err(AppError::Json(_))));
        assert!(matches!(
            parse_import(br#"[{"id":"a","startCoords":"here","endCoords":[1,0],"distance":1}]"#),
            Err(AppError::Json(_))
        ));
    }

    #[test]
    fn accepts_records_without_id_or_distance() {
        let raw = br#"[
            {"id":"a","startCoords":[0,0],"endCoords":[1,1],"mode":"car","date":"2024-05-01","notes":""},
            {"startCoords":[0,0],"endCoords":[1,1],"mode":"bus","date":"2024-05-02","notes":"","distance":157.2}
        ]"#;
        let trips = parse_import(raw).unwrap();
        assert_eq!(trips.len(), 2);
        assert_eq!(trips[0].id, "a");
        assert_eq!(trips[0].distance, 0.0);
        assert_eq!(trips[1].id, "");
        assert_eq!(trips[1].distance, 157.2);
    }

    #[test]
    fn tolerates_unrecognized_content() {
        let raw = br#"[{"id":"a","startCoords":[0,0],"endCoords":[1,0],"mode":"teleport","distance":0}]"#;
        let trips = parse_import(raw).unwrap();
        assert_eq!(trips.len(), 1);
        assert_eq!(trips[0].mode.as_str(), "teleport");
    }
}
