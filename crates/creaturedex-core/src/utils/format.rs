use crate::models::Coordinates;

/// Truncate a string to a maximum length, adding ellipsis if needed
pub fn truncate_string(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else if max_len <= 3 {
        s.chars().take(max_len).collect()
    } else {
        let truncated: String = s.chars().take(max_len - 3).collect();
        format!("{}...", truncated)
    }
}

/// Format coordinates with hemisphere letters, e.g. "51.9173° N, 4.4846° E"
pub fn format_coordinates(coordinates: Coordinates) -> String {
    let ns = if coordinates.latitude >= 0.0 { 'N' } else { 'S' };
    let ew = if coordinates.longitude >= 0.0 { 'E' } else { 'W' };
    format!(
        "{:.4}° {}, {:.4}° {}",
        coordinates.latitude.abs(),
        ns,
        coordinates.longitude.abs(),
        ew
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_string() {
        assert_eq!(truncate_string("Hello", 10), "Hello");
        assert_eq!(truncate_string("Hello World", 8), "Hello...");
        assert_eq!(truncate_string("Hi", 2), "Hi");
        assert_eq!(truncate_string("Drakón", 6), "Drakón");
    }

    #[test]
    fn test_format_coordinates() {
        let rotterdam = Coordinates {
            latitude: 51.917319,
            longitude: 4.484609,
        };
        assert_eq!(format_coordinates(rotterdam), "51.9173° N, 4.4846° E");

        let south_west = Coordinates {
            latitude: -33.5,
            longitude: -70.25,
        };
        assert_eq!(format_coordinates(south_west), "33.5000° S, 70.2500° W");
    }
}
