use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// JSON из хранилища пишется внешним анализатором: поля могут отсутствовать
/// или быть `null`. В обоих случаях берём значение по умолчанию.
pub(crate) fn nullable<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

// ============================================================================
// Plan
// ============================================================================

/// Тариф оператора (конкурента или собственный)
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "PlanRecord")]
pub struct Plan {
    pub brand: String,
    pub contract: String,
    /// Объём данных в свободной форме: "100GB", "Unlimited", ...
    pub data: String,
    pub roaming: String,
    pub speed: String,
    #[serde(rename = "price_per_month_GBP")]
    pub price_per_month_gbp: f64,
    pub extras: Option<String>,
    pub notes: Option<String>,
    pub competitiveness_score: f64,
    pub source: Option<String>,
}

/// Тариф в том виде, как его пишет анализатор. Ссылка на источник
/// встречается под `source` или `source_URL`, иногда под обоими ключами.
#[derive(Deserialize)]
struct PlanRecord {
    #[serde(default, deserialize_with = "nullable")]
    brand: String,
    #[serde(default, deserialize_with = "nullable")]
    contract: String,
    #[serde(default, deserialize_with = "nullable")]
    data: String,
    #[serde(default, deserialize_with = "nullable")]
    roaming: String,
    #[serde(default, deserialize_with = "nullable")]
    speed: String,
    #[serde(rename = "price_per_month_GBP", default, deserialize_with = "nullable")]
    price_per_month_gbp: f64,
    #[serde(default, deserialize_with = "nullable")]
    extras: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    notes: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    competitiveness_score: f64,
    #[serde(default, deserialize_with = "nullable")]
    source: Option<String>,
    #[serde(rename = "source_URL", default, deserialize_with = "nullable")]
    source_url: Option<String>,
}

impl From<PlanRecord> for Plan {
    fn from(r: PlanRecord) -> Self {
        Plan {
            brand: r.brand,
            contract: r.contract,
            data: r.data,
            roaming: r.roaming,
            speed: r.speed,
            price_per_month_gbp: r.price_per_month_gbp,
            extras: r.extras,
            notes: r.notes,
            competitiveness_score: r.competitiveness_score,
            source: r.source.or(r.source_url),
        }
    }
}

impl Plan {
    /// Дополнительные опции для отображения ("None" если пусто)
    pub fn extras_display(&self) -> &str {
        match self.extras.as_deref() {
            Some(extras) if !extras.is_empty() => extras,
            _ => "None",
        }
    }

    pub fn notes_display(&self) -> &str {
        self.notes.as_deref().unwrap_or_default()
    }
}

// ============================================================================
// Nested records
// ============================================================================

/// Общая оценка конкурентной ситуации
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SentimentData {
    #[serde(default, deserialize_with = "nullable")]
    pub sentiment: String,
    #[serde(default, deserialize_with = "nullable")]
    pub score: f64,
    #[serde(default, deserialize_with = "nullable")]
    pub rationale: String,
}

/// Рекомендованная цена с обоснованием
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PriceSuggestion {
    #[serde(default, deserialize_with = "nullable")]
    pub price: f64,
    #[serde(default, deserialize_with = "nullable")]
    pub motivation: String,
}

/// Анализ одного собственного продукта бренда
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ProductAnalysis {
    #[serde(default, deserialize_with = "nullable")]
    pub product_name: String,
    #[serde(default, deserialize_with = "nullable")]
    pub data_tier: String,
    #[serde(default, deserialize_with = "nullable")]
    pub roaming_tier: String,
    #[serde(default, deserialize_with = "nullable")]
    pub product_breakdown: Plan,
    #[serde(default, deserialize_with = "nullable")]
    pub comparable_products: Vec<Plan>,
    #[serde(
        rename = "o2_product_sentiments",
        default,
        deserialize_with = "nullable"
    )]
    pub product_sentiments: Vec<String>,
    #[serde(rename = "o2_product_changes", default, deserialize_with = "nullable")]
    pub product_changes: Vec<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub price_suggestions: Vec<PriceSuggestion>,
}

impl ProductAnalysis {
    /// Текущая цена продукта
    pub fn current_price(&self) -> f64 {
        self.product_breakdown.price_per_month_gbp
    }

    pub fn competitiveness_score(&self) -> f64 {
        self.product_breakdown.competitiveness_score
    }

    /// Лучшие `limit` сопоставимых тарифов по убыванию оценки
    pub fn top_comparables(&self, limit: usize) -> Vec<&Plan> {
        let mut comparables: Vec<&Plan> = self.comparable_products.iter().collect();
        comparables.sort_by(|a, b| b.competitiveness_score.total_cmp(&a.competitiveness_score));
        comparables.truncate(limit);
        comparables
    }
}

// ============================================================================
// Aggregate Root
// ============================================================================

/// Результат одного прогона конкурентного анализа
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompetitiveAnalysis {
    pub id: String,
    #[serde(default, deserialize_with = "nullable")]
    pub analysis_timestamp: String,
    #[serde(default, deserialize_with = "nullable")]
    pub currency: String,
    #[serde(default, deserialize_with = "nullable")]
    pub llm_provider: String,
    #[serde(default, deserialize_with = "nullable")]
    pub overall_competitive_sentiments: Vec<SentimentData>,
    #[serde(rename = "o2_products_analysis", default, deserialize_with = "nullable")]
    pub products_analysis: Vec<ProductAnalysis>,
    #[serde(default, deserialize_with = "nullable")]
    pub full_competitive_dataset_all_plans: Vec<Plan>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl CompetitiveAnalysis {
    /// Первые 8 символов ID для заголовков ("Analysis #1a2b3c4d")
    pub fn short_id(&self) -> String {
        self.id.chars().take(8).collect()
    }

    /// Двухбуквенный значок карточки
    pub fn badge(&self) -> String {
        self.id.chars().take(2).collect::<String>().to_uppercase()
    }

    /// Средняя оценка по всем sentiment, округлённая до целого.
    /// Половина округляется вверх (как Math.round в браузере).
    pub fn average_sentiment_score(&self) -> Option<i64> {
        let sentiments = &self.overall_competitive_sentiments;
        if sentiments.is_empty() {
            return None;
        }
        let total: f64 = sentiments.iter().map(|s| s.score).sum();
        let mean = total / sentiments.len() as f64;
        Some((mean + 0.5).floor() as i64)
    }

    /// Sentiment по убыванию оценки (порядок равных сохраняется)
    pub fn sentiments_by_score(&self) -> Vec<&SentimentData> {
        let mut sentiments: Vec<&SentimentData> =
            self.overall_competitive_sentiments.iter().collect();
        sentiments.sort_by(|a, b| b.score.total_cmp(&a.score));
        sentiments
    }

    /// Продукты по возрастанию оценки вместе с исходным индексом.
    /// Индекс нужен для ссылок на страницу продукта.
    pub fn products_by_score(&self) -> Vec<(usize, &ProductAnalysis)> {
        let mut products: Vec<(usize, &ProductAnalysis)> =
            self.products_analysis.iter().enumerate().collect();
        products.sort_by(|(_, a), (_, b)| {
            a.competitiveness_score()
                .total_cmp(&b.competitiveness_score())
        });
        products
    }

    pub fn product(&self, index: usize) -> Option<&ProductAnalysis> {
        self.products_analysis.get(index)
    }

    /// Группировка тарифов по бренду в порядке первого появления бренда
    pub fn plans_by_brand(&self) -> Vec<(&str, Vec<&Plan>)> {
        let mut groups: Vec<(&str, Vec<&Plan>)> = Vec::new();
        for plan in &self.full_competitive_dataset_all_plans {
            match groups.iter_mut().find(|(brand, _)| *brand == plan.brand) {
                Some((_, plans)) => plans.push(plan),
                None => groups.push((plan.brand.as_str(), vec![plan])),
            }
        }
        groups
    }

    pub fn summary(&self) -> AnalysisSummary {
        AnalysisSummary {
            id: self.id.clone(),
            short_id: self.short_id(),
            badge: self.badge(),
            analysis_timestamp: self.analysis_timestamp.clone(),
            created_at: self.created_at,
            currency: self.currency.clone(),
            llm_provider: self.llm_provider.clone(),
            sentiment_count: self.overall_competitive_sentiments.len(),
            product_count: self.products_analysis.len(),
            plan_count: self.full_competitive_dataset_all_plans.len(),
            average_score: self.average_sentiment_score(),
        }
    }
}

// ============================================================================
// DTOs
// ============================================================================

/// Карточка анализа для главной страницы
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisSummary {
    pub id: String,
    pub short_id: String,
    pub badge: String,
    pub analysis_timestamp: String,
    pub created_at: DateTime<Utc>,
    pub currency: String,
    pub llm_provider: String,
    pub sentiment_count: usize,
    pub product_count: usize,
    pub plan_count: usize,
    pub average_score: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn plan(brand: &str, score: f64) -> Plan {
        Plan {
            brand: brand.to_string(),
            competitiveness_score: score,
            ..Plan::default()
        }
    }

    fn analysis() -> CompetitiveAnalysis {
        let ts = Utc.with_ymd_and_hms(2025, 11, 11, 9, 30, 0).unwrap();
        CompetitiveAnalysis {
            id: "3f2a9c71-0b4e-4e55-9d7e-2b1c9f0e8a11".to_string(),
            analysis_timestamp: "2025-11-11T09:30:00Z".to_string(),
            currency: "GBP".to_string(),
            llm_provider: "openai".to_string(),
            overall_competitive_sentiments: vec![
                SentimentData {
                    sentiment: "Pricing pressure".into(),
                    score: 60.0,
                    rationale: String::new(),
                },
                SentimentData {
                    sentiment: "Network quality".into(),
                    score: 81.0,
                    rationale: String::new(),
                },
                SentimentData {
                    sentiment: "Roaming".into(),
                    score: 60.0,
                    rationale: String::new(),
                },
            ],
            products_analysis: vec![
                ProductAnalysis {
                    product_name: "30GB SIM".into(),
                    product_breakdown: plan("O2", 72.0),
                    ..ProductAnalysis::default()
                },
                ProductAnalysis {
                    product_name: "Unlimited".into(),
                    product_breakdown: plan("O2", 40.0),
                    ..ProductAnalysis::default()
                },
            ],
            full_competitive_dataset_all_plans: vec![
                plan("EE", 50.0),
                plan("O2", 70.0),
                plan("EE", 55.0),
                plan("Three", 65.0),
            ],
            created_at: ts,
            updated_at: ts,
        }
    }

    #[test]
    fn test_plan_deserializes_missing_and_null_fields() {
        let json = r#"{
            "brand": "Vodafone",
            "contract": null,
            "data": "100GB",
            "price_per_month_GBP": 18.5,
            "competitiveness_score": 64,
            "source_URL": "vodafone-2025-11-11"
        }"#;
        let plan: Plan = serde_json::from_str(json).unwrap();
        assert_eq!(plan.brand, "Vodafone");
        assert_eq!(plan.contract, "");
        assert_eq!(plan.roaming, "");
        assert_eq!(plan.price_per_month_gbp, 18.5);
        assert_eq!(plan.competitiveness_score, 64.0);
        assert_eq!(plan.source.as_deref(), Some("vodafone-2025-11-11"));
        assert_eq!(plan.extras, None);
        assert_eq!(plan.extras_display(), "None");
    }

    #[test]
    fn test_plan_with_both_source_keys_prefers_source() {
        let json = r#"{"brand": "EE", "source": "ee-1", "source_URL": "https://ee"}"#;
        let plan: Plan = serde_json::from_str(json).unwrap();
        assert_eq!(plan.source.as_deref(), Some("ee-1"));

        let json = r#"{"brand": "EE", "source": null, "source_URL": "https://ee"}"#;
        let plan: Plan = serde_json::from_str(json).unwrap();
        assert_eq!(plan.source.as_deref(), Some("https://ee"));
    }

    #[test]
    fn test_plan_serializes_wire_names() {
        let value = serde_json::to_value(plan("EE", 1.0)).unwrap();
        assert!(value.get("price_per_month_GBP").is_some());
        assert!(value.get("source").is_some());
    }

    #[test]
    fn test_short_id_and_badge() {
        let a = analysis();
        assert_eq!(a.short_id(), "3f2a9c71");
        assert_eq!(a.badge(), "3F");
    }

    #[test]
    fn test_average_sentiment_score() {
        let mut a = analysis();
        // (60 + 81 + 60) / 3 = 67
        assert_eq!(a.average_sentiment_score(), Some(67));
        a.overall_competitive_sentiments.truncate(1);
        a.overall_competitive_sentiments[0].score = 62.5;
        assert_eq!(a.average_sentiment_score(), Some(63));
        a.overall_competitive_sentiments.clear();
        assert_eq!(a.average_sentiment_score(), None);
    }

    #[test]
    fn test_sentiments_by_score_is_stable() {
        let a = analysis();
        let names: Vec<&str> = a
            .sentiments_by_score()
            .iter()
            .map(|s| s.sentiment.as_str())
            .collect();
        assert_eq!(names, vec!["Network quality", "Pricing pressure", "Roaming"]);
    }

    #[test]
    fn test_products_by_score_keeps_original_index() {
        let a = analysis();
        let order: Vec<usize> = a.products_by_score().iter().map(|(i, _)| *i).collect();
        assert_eq!(order, vec![1, 0]);
        assert!(a.product(2).is_none());
    }

    #[test]
    fn test_plans_by_brand() {
        let a = analysis();
        let groups = a.plans_by_brand();
        let brands: Vec<&str> = groups.iter().map(|(b, _)| *b).collect();
        assert_eq!(brands, vec!["EE", "O2", "Three"]);
        let ee_scores: Vec<f64> = groups[0].1.iter().map(|p| p.competitiveness_score).collect();
        assert_eq!(ee_scores, vec![50.0, 55.0]);
    }

    #[test]
    fn test_top_comparables() {
        let product = ProductAnalysis {
            comparable_products: (1..=7).map(|i| plan("X", i as f64 * 10.0)).collect(),
            ..ProductAnalysis::default()
        };
        let top: Vec<f64> = product
            .top_comparables(5)
            .iter()
            .map(|p| p.competitiveness_score)
            .collect();
        assert_eq!(top, vec![70.0, 60.0, 50.0, 40.0, 30.0]);
    }

    #[test]
    fn test_summary_counts() {
        let summary = analysis().summary();
        assert_eq!(summary.sentiment_count, 3);
        assert_eq!(summary.product_count, 2);
        assert_eq!(summary.plan_count, 4);
        assert_eq!(summary.short_id, "3f2a9c71");
    }
}
