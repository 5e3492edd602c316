/// Утилиты для таблиц: индикатор сортировки и форматирование ячеек
use contracts::shared::plan_table::{SortDirection, SortField, SortState};

/// Индикатор в заголовке колонки: ▲ по возрастанию, ▼ по убыванию,
/// ⇅ если колонка сейчас не сортирует таблицу
pub fn get_sort_indicator(sort: &SortState, field: SortField) -> &'static str {
    match sort.direction_for(field) {
        Some(SortDirection::Asc) => " ▲",
        Some(SortDirection::Desc) => " ▼",
        None => " ⇅",
    }
}

/// CSS-класс индикатора: активная колонка подсвечивается
pub fn get_sort_class(sort: &SortState, field: SortField) -> &'static str {
    if sort.field() == Some(field) {
        "table__sort-icon table__sort-icon--active"
    } else {
        "table__sort-icon"
    }
}

/// Цена в фунтах: "£12.50"
pub fn format_price(value: f64) -> String {
    format!("£{:.2}", value)
}

/// Оценка без лишних нулей: 72 -> "72", 72.3 -> "72.3"
pub fn format_score(value: f64) -> String {
    if value.fract() == 0.0 && value.is_finite() {
        format!("{}", value as i64)
    } else {
        format!("{:.1}", value)
    }
}

/// Надпись "Showing X of Y plans"
pub fn showing_label(visible: usize, total: usize) -> String {
    format!("Showing {} of {} plans", visible, total)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sort_indicator_follows_toggle_cycle() {
        let mut sort = SortState::default();
        assert_eq!(get_sort_indicator(&sort, SortField::Price), " ⇅");
        sort.toggle(SortField::Price);
        assert_eq!(get_sort_indicator(&sort, SortField::Price), " ▲");
        assert_eq!(get_sort_indicator(&sort, SortField::Brand), " ⇅");
        assert!(get_sort_class(&sort, SortField::Price).ends_with("--active"));
        assert_eq!(get_sort_class(&sort, SortField::Brand), "table__sort-icon");
        sort.toggle(SortField::Price);
        assert_eq!(get_sort_indicator(&sort, SortField::Price), " ▼");
        sort.toggle(SortField::Price);
        assert_eq!(get_sort_indicator(&sort, SortField::Price), " ⇅");
    }

    #[test]
    fn test_formatting() {
        assert_eq!(format_price(12.5), "£12.50");
        assert_eq!(format_score(72.0), "72");
        assert_eq!(format_score(72.3), "72.3");
        assert_eq!(showing_label(3, 10), "Showing 3 of 10 plans");
    }
}
