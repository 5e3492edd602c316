//! Выбор иконки по тексту.
//!
//! Каждая таблица правил просматривается сверху вниз: первое правило, у
//! которого хотя бы одно ключевое слово входит в текст (без учёта регистра),
//! определяет иконку. Порядок правил и есть приоритет.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum IconKind {
    AlertTriangle,
    Award,
    BarChart,
    Briefcase,
    Building,
    CheckCircle,
    Database,
    DollarSign,
    Download,
    Globe,
    Info,
    Lightbulb,
    MapPin,
    PieChart,
    Plus,
    Shield,
    Sparkles,
    Star,
    Target,
    TrendingUp,
    Users,
    Wifi,
    Zap,
}

impl IconKind {
    /// Имя иконки в наборе SVG фронтенда
    pub fn name(&self) -> &'static str {
        match self {
            IconKind::AlertTriangle => "alert-triangle",
            IconKind::Award => "award",
            IconKind::BarChart => "bar-chart",
            IconKind::Briefcase => "briefcase",
            IconKind::Building => "building",
            IconKind::CheckCircle => "check-circle",
            IconKind::Database => "database",
            IconKind::DollarSign => "dollar-sign",
            IconKind::Download => "download",
            IconKind::Globe => "globe",
            IconKind::Info => "info",
            IconKind::Lightbulb => "lightbulb",
            IconKind::MapPin => "map-pin",
            IconKind::PieChart => "pie-chart",
            IconKind::Plus => "plus",
            IconKind::Shield => "shield",
            IconKind::Sparkles => "sparkles",
            IconKind::Star => "star",
            IconKind::Target => "target",
            IconKind::TrendingUp => "trending-up",
            IconKind::Users => "users",
            IconKind::Wifi => "wifi",
            IconKind::Zap => "zap",
        }
    }
}

/// Цвет иконки
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IconTone {
    Red,
    Yellow,
    Green,
    Blue,
    Indigo,
    Purple,
    Orange,
}

impl IconTone {
    pub fn css_class(&self) -> &'static str {
        match self {
            IconTone::Red => "icon--red",
            IconTone::Yellow => "icon--yellow",
            IconTone::Green => "icon--green",
            IconTone::Blue => "icon--blue",
            IconTone::Indigo => "icon--indigo",
            IconTone::Purple => "icon--purple",
            IconTone::Orange => "icon--orange",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IconChoice {
    pub icon: IconKind,
    pub tone: IconTone,
}

/// Правило таблицы: ключевые слова -> иконка
#[derive(Debug, Clone, Copy)]
pub struct IconRule {
    pub keywords: &'static [&'static str],
    pub choice: IconChoice,
}

const fn rule(keywords: &'static [&'static str], icon: IconKind, tone: IconTone) -> IconRule {
    IconRule {
        keywords,
        choice: IconChoice { icon, tone },
    }
}

impl IconRule {
    /// `lower` уже в нижнем регистре
    fn matches(&self, lower: &str) -> bool {
        self.keywords.iter().any(|k| lower.contains(k))
    }
}

/// Первое подходящее правило
pub fn select_rule<'r>(rules: &'r [IconRule], text: &str) -> Option<&'r IconRule> {
    let lower = text.to_lowercase();
    rules.iter().find(|r| r.matches(&lower))
}

// ============================================================================
// Score bands
// ============================================================================

/// Диапазон оценки: > 70 высокий, > 50 средний, иначе низкий
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoreBand {
    High,
    Medium,
    Low,
}

impl ScoreBand {
    pub fn from_score(score: f64) -> Self {
        if score > 70.0 {
            ScoreBand::High
        } else if score > 50.0 {
            ScoreBand::Medium
        } else {
            ScoreBand::Low
        }
    }

    /// Модификатор CSS для бейджа оценки
    pub fn css_modifier(&self) -> &'static str {
        match self {
            ScoreBand::High => "high",
            ScoreBand::Medium => "medium",
            ScoreBand::Low => "low",
        }
    }
}

// ============================================================================
// Rule tables
// ============================================================================

// Тон для sentiment определяется оценкой, а не правилом
pub const SENTIMENT_RULES: &[IconRule] = &[
    rule(&["price", "cost", "pricing", "£"], IconKind::DollarSign, IconTone::Blue),
    rule(&["customer", "user", "satisfaction", "experience"], IconKind::Users, IconTone::Blue),
    rule(&["market", "position", "competitive", "competition"], IconKind::Target, IconTone::Blue),
    rule(&["network", "coverage", "5g", "4g"], IconKind::Wifi, IconTone::Blue),
    rule(&["data", "gb", "allowance", "usage"], IconKind::Database, IconTone::Blue),
    rule(&["roaming", "international", "travel"], IconKind::MapPin, IconTone::Blue),
    rule(&["brand", "reputation", "trust", "quality"], IconKind::Award, IconTone::Blue),
    rule(&["security", "privacy", "protection"], IconKind::Shield, IconTone::Blue),
    rule(&["business", "enterprise", "corporate"], IconKind::Briefcase, IconTone::Blue),
    rule(&["performance", "speed", "efficiency"], IconKind::Zap, IconTone::Blue),
    rule(&["analytics", "metrics", "analysis"], IconKind::PieChart, IconTone::Blue),
    rule(&["rating", "review", "feedback"], IconKind::Star, IconTone::Blue),
    rule(&["infrastructure", "facility", "office"], IconKind::Building, IconTone::Blue),
];

pub const INSIGHT_RULES: &[IconRule] = &[
    rule(&["competitive", "advantage", "better", "superior"], IconKind::Sparkles, IconTone::Red),
    rule(
        &["weak", "challenge", "behind", "disadvantage", "poor"],
        IconKind::AlertTriangle,
        IconTone::Red,
    ),
    rule(
        &["price", "cost", "expensive", "affordable", "£"],
        IconKind::DollarSign,
        IconTone::Green,
    ),
    rule(&["data", "gb", "allowance", "usage"], IconKind::BarChart, IconTone::Blue),
    rule(&["market", "position", "share", "segment"], IconKind::TrendingUp, IconTone::Indigo),
    rule(
        &["customer", "user", "experience", "satisfaction"],
        IconKind::Users,
        IconTone::Orange,
    ),
];

pub const CHANGE_RULES: &[IconRule] = &[
    rule(&["price", "cost", "£"], IconKind::DollarSign, IconTone::Green),
    rule(&["data", "gb", "allowance"], IconKind::Download, IconTone::Indigo),
    rule(&["speed", "5g", "4g", "network"], IconKind::Zap, IconTone::Purple),
    rule(&["roaming", "international", "travel"], IconKind::Globe, IconTone::Orange),
    rule(&["feature", "add", "include", "extra"], IconKind::Plus, IconTone::Green),
    rule(&["market", "position", "competitive"], IconKind::BarChart, IconTone::Red),
];

fn score_tone(band: ScoreBand) -> IconTone {
    match band {
        ScoreBand::High => IconTone::Red,
        ScoreBand::Medium => IconTone::Yellow,
        ScoreBand::Low => IconTone::Green,
    }
}

/// Иконка общей оценки рынка. Если ни одно правило не подошло,
/// иконка выбирается по диапазону оценки.
pub fn sentiment_icon(text: &str, score: f64) -> IconChoice {
    let band = ScoreBand::from_score(score);
    let icon = match select_rule(SENTIMENT_RULES, text) {
        Some(r) => r.choice.icon,
        None => match band {
            ScoreBand::High => IconKind::AlertTriangle,
            ScoreBand::Medium => IconKind::Info,
            ScoreBand::Low => IconKind::CheckCircle,
        },
    };
    IconChoice {
        icon,
        tone: score_tone(band),
    }
}

/// Иконка вывода по продукту
pub fn insight_icon(text: &str) -> IconChoice {
    select_rule(INSIGHT_RULES, text)
        .map(|r| r.choice)
        .unwrap_or(IconChoice {
            icon: IconKind::Info,
            tone: IconTone::Blue,
        })
}

/// Иконка рекомендуемого изменения
pub fn change_icon(text: &str) -> IconChoice {
    select_rule(CHANGE_RULES, text)
        .map(|r| r.choice)
        .unwrap_or(IconChoice {
            icon: IconKind::Lightbulb,
            tone: IconTone::Blue,
        })
}
