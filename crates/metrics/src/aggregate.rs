use serde::{Deserialize, Serialize};

use crate::error::{MetricsError, Result};
use crate::scores::MetricScores;

/// Per-group summary of a batch of scored comparisons. The serialized field
/// names match the report format consumed by the plotting side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateRecord {
    #[serde(rename = "Nome do Arquivo")]
    pub group: String,
    #[serde(rename = "Min")]
    pub min: MetricScores,
    #[serde(rename = "Max")]
    pub max: MetricScores,
    #[serde(rename = "Media")]
    pub mean: MetricScores,
    #[serde(rename = "Desvio Padrao")]
    pub std_dev: MetricScores,
}

#[derive(Debug, Clone, Copy)]
struct Statistics {
    min: f64,
    max: f64,
    mean: f64,
    std_dev: f64,
}

impl Statistics {
    fn from_values(values: &[f64]) -> Self {
        let count = values.len() as f64;
        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let mean = values.iter().sum::<f64>() / count;
        // population standard deviation
        let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / count;
        Self {
            min,
            max,
            mean,
            std_dev: variance.sqrt(),
        }
    }
}

/// Summarize a group's scores into min/max/mean/standard deviation per metric.
pub fn aggregate(group: &str, scores: &[MetricScores]) -> Result<AggregateRecord> {
    if scores.is_empty() {
        return Err(MetricsError::EmptyGroup);
    }

    let collect = |extract: fn(&MetricScores) -> f64| -> Statistics {
        let values: Vec<f64> = scores.iter().map(extract).collect();
        Statistics::from_values(&values)
    };
    let dice = collect(|s| s.dice);
    let fit = collect(|s| s.fit);
    let size = collect(|s| s.size);
    let position = collect(|s| s.position);

    let select = |pick: fn(&Statistics) -> f64| MetricScores {
        dice: pick(&dice),
        fit: pick(&fit),
        size: pick(&size),
        position: pick(&position),
    };

    Ok(AggregateRecord {
        group: group.to_owned(),
        min: select(|s| s.min),
        max: select(|s| s.max),
        mean: select(|s| s.mean),
        std_dev: select(|s| s.std_dev),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_scores() -> Vec<MetricScores> {
        vec![
            MetricScores {
                dice: 0.9,
                fit: 0.8,
                size: 0.95,
                position: 0.99,
            },
            MetricScores {
                dice: 0.7,
                fit: 0.6,
                size: 0.85,
                position: 0.97,
            },
            MetricScores {
                dice: 0.8,
                fit: 0.7,
                size: 0.90,
                position: 0.98,
            },
        ]
    }

    #[test]
    fn min_mean_max_ordering_holds() {
        let record = aggregate("Blueberry__healthy", &sample_scores()).unwrap();
        for pick in [
            |s: &MetricScores| s.dice,
            |s: &MetricScores| s.fit,
            |s: &MetricScores| s.size,
            |s: &MetricScores| s.position,
        ] {
            assert!(pick(&record.min) <= pick(&record.mean));
            assert!(pick(&record.mean) <= pick(&record.max));
            assert!(pick(&record.std_dev) >= 0.0);
        }
    }

    #[test]
    fn identical_scores_collapse_the_spread() {
        let scores = vec![sample_scores()[0]; 4];
        let record = aggregate("group", &scores).unwrap();
        assert_eq!(record.min, record.max);
        assert_eq!(record.min, record.mean);
        assert_eq!(record.std_dev.dice, 0.0);
        assert_eq!(record.std_dev.position, 0.0);
    }

    #[test]
    fn mean_and_std_dev_are_exact_on_a_known_list() {
        let record = aggregate("group", &sample_scores()).unwrap();
        assert!((record.mean.dice - 0.8).abs() < 1e-12);
        // population stddev of {0.9, 0.7, 0.8}
        let expected = (0.02f64 / 3.0).sqrt();
        assert!((record.std_dev.dice - expected).abs() < 1e-12);
    }

    #[test]
    fn empty_group_is_an_error() {
        assert!(matches!(
            aggregate("group", &[]),
            Err(MetricsError::EmptyGroup)
        ));
    }

    #[test]
    fn serialized_field_names_match_the_report_format() {
        let record = aggregate("Blueberry__healthy", &sample_scores()).unwrap();
        let value = serde_json::to_value(&record).unwrap();
        let object = value.as_object().unwrap();
        for key in ["Nome do Arquivo", "Min", "Max", "Media", "Desvio Padrao"] {
            assert!(object.contains_key(key), "missing {key}");
        }
        let min = object["Min"].as_object().unwrap();
        for key in ["Dice", "Fit", "Size", "Position"] {
            assert!(min.contains_key(key), "missing {key}");
        }
    }
}
