pub mod a001_competitive_analysis;
