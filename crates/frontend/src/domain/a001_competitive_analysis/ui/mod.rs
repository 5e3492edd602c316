pub mod dataset;
pub mod details;
pub mod list;
pub mod product;

/// Ссылки между страницами анализа
pub fn analysis_href(id: &str) -> String {
    format!("/analysis/{}", id)
}

pub fn dataset_href(id: &str) -> String {
    format!("/analysis/{}/dataset", id)
}

/// `index` это исходная позиция продукта в анализе, не позиция на экране
pub fn product_href(id: &str, index: usize) -> String {
    format!("/analysis/{}/product/{}", id, index)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hrefs() {
        assert_eq!(analysis_href("3f2a"), "/analysis/3f2a");
        assert_eq!(dataset_href("3f2a"), "/analysis/3f2a/dataset");
        assert_eq!(product_href("3f2a", 2), "/analysis/3f2a/product/2");
    }
}
