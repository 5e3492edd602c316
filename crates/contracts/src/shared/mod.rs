pub mod insight_icons;
pub mod plan_table;
pub mod pricing;
pub mod source_label;
