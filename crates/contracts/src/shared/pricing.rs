use serde::{Deserialize, Serialize};

use crate::domain::a001_competitive_analysis::aggregate::{PriceSuggestion, ProductAnalysis};

/// Изменение цены относительно текущей.
///
/// `amount > 0` означает снижение цены для клиента.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceChange {
    pub amount: f64,
    pub percentage: f64,
}

impl PriceChange {
    pub fn between(current: f64, suggested: f64) -> Self {
        let amount = current - suggested;
        Self {
            amount,
            percentage: percentage_of(amount, current),
        }
    }

    /// Изменение хотя бы на £1 в любую сторону
    pub fn is_significant(&self) -> bool {
        self.amount.abs() >= 1.0
    }

    pub fn is_decrease(&self) -> bool {
        self.amount > 0.0
    }
}

fn percentage_of(amount: f64, base: f64) -> f64 {
    if base == 0.0 {
        0.0
    } else {
        amount / base * 100.0
    }
}

/// Самая низкая предложенная цена; при равенстве побеждает первая
pub fn best_suggestion(suggestions: &[PriceSuggestion]) -> Option<&PriceSuggestion> {
    suggestions
        .iter()
        .reduce(|best, current| if current.price < best.price { current } else { best })
}

/// Сводка по портфелю продуктов, для которых есть рекомендации
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioSummary {
    /// Исходные индексы продуктов с рекомендациями
    pub product_indices: Vec<usize>,
    pub total_current: f64,
    /// Сумма средних рекомендованных цен по продуктам
    pub total_suggested: f64,
    pub potential_savings: f64,
    pub savings_percentage: f64,
}

/// `None` если ни у одного продукта нет рекомендаций
pub fn portfolio_summary(products: &[ProductAnalysis]) -> Option<PortfolioSummary> {
    let with_suggestions: Vec<(usize, &ProductAnalysis)> = products
        .iter()
        .enumerate()
        .filter(|(_, p)| !p.price_suggestions.is_empty())
        .collect();
    if with_suggestions.is_empty() {
        return None;
    }

    let total_current: f64 = with_suggestions.iter().map(|(_, p)| p.current_price()).sum();
    let total_suggested: f64 = with_suggestions
        .iter()
        .map(|(_, p)| {
            let sum: f64 = p.price_suggestions.iter().map(|s| s.price).sum();
            sum / p.price_suggestions.len() as f64
        })
        .sum();
    let potential_savings = total_current - total_suggested;

    Some(PortfolioSummary {
        product_indices: with_suggestions.iter().map(|(i, _)| *i).collect(),
        total_current,
        total_suggested,
        potential_savings,
        savings_percentage: percentage_of(potential_savings, total_current),
    })
}
