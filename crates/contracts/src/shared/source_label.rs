/// Короткое имя источника из идентификатора вида "o2-2025-11-11".
///
/// Возвращает часть до первого `-`; "Unknown" если источник не задан.
pub fn extract_source_name(source: Option<&str>) -> &str {
    match source {
        Some(s) if !s.is_empty() => s.split('-').next().unwrap_or(s),
        _ => "Unknown",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_source_name() {
        assert_eq!(extract_source_name(Some("o2-2025-11-11")), "o2");
        assert_eq!(extract_source_name(Some("vodafone")), "vodafone");
        assert_eq!(extract_source_name(Some("-2025")), "");
        assert_eq!(extract_source_name(Some("")), "Unknown");
        assert_eq!(extract_source_name(None), "Unknown");
    }
}
