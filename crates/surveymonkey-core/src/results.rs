//! Per-question aggregation of collected answers.

use serde::{Deserialize, Serialize};

use crate::models::{QuestionAnswers, QuestionKind, Survey};

const MAX_HISTOGRAM_BINS: usize = 200;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SurveyResults {
    pub survey_code: String,
    pub title: String,
    pub is_public: bool,
    pub response_count: usize,
    pub questions: Vec<QuestionResult>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionResult {
    pub question_id: String,
    pub prompt: String,
    pub answer_count: usize,
    pub summary: ResultSummary,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(
    tag = "type",
    rename_all = "SCREAMING_SNAKE_CASE",
    rename_all_fields = "camelCase"
)]
pub enum ResultSummary {
    OpenEnded {
        answers: Vec<String>,
    },
    Histogram {
        bins: Vec<HistogramBin>,
        invalid: usize,
    },
    #[serde(rename = "OPTION")]
    MultipleChoice {
        tallies: Vec<OptionTally>,
        other: usize,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistogramBin {
    pub lower: f64,
    pub upper: f64,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionTally {
    pub choice: String,
    pub count: usize,
}

impl SurveyResults {
    #[must_use]
    pub fn from_survey(survey: &Survey) -> Self {
        Self {
            survey_code: survey.survey_code().to_string(),
            title: survey.title().to_string(),
            is_public: survey.is_public(),
            response_count: survey.response_count(),
            questions: survey.questions().iter().map(summarize_question).collect(),
        }
    }
}

fn summarize_question(pair: &QuestionAnswers) -> QuestionResult {
    let summary = match &pair.question.kind {
        QuestionKind::OpenEnded => ResultSummary::OpenEnded {
            answers: pair.answer_values().map(str::to_string).collect(),
        },
        QuestionKind::Histogram {
            min_value,
            max_value,
            step_size,
        } => histogram(pair, *min_value, *max_value, *step_size),
        QuestionKind::MultipleChoice { choices } => tally_choices(pair, choices),
    };
    QuestionResult {
        question_id: pair.question.id.clone(),
        prompt: pair.question.prompt.clone(),
        answer_count: pair.answers.len(),
        summary,
    }
}

#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss,
    reason = "bin indices are bounded by MAX_HISTOGRAM_BINS and range checked before casting"
)]
fn histogram(pair: &QuestionAnswers, min: f64, max: f64, step: f64) -> ResultSummary {
    let span = max - min;
    if !(span > 0.0 && step > 0.0) {
        return ResultSummary::Histogram {
            bins: Vec::new(),
            invalid: pair.answers.len(),
        };
    }
    let mut bin_count = (span / step).ceil().max(1.0) as usize;
    let mut width = step;
    if bin_count > MAX_HISTOGRAM_BINS {
        bin_count = MAX_HISTOGRAM_BINS;
        width = span / MAX_HISTOGRAM_BINS as f64;
    }

    let mut bins: Vec<HistogramBin> = (0..bin_count)
        .map(|index| {
            let lower = (index as f64).mul_add(width, min);
            HistogramBin {
                lower,
                upper: (lower + width).min(max),
                count: 0,
            }
        })
        .collect();

    let mut invalid = 0;
    for value in pair.answer_values() {
        match value.trim().parse::<f64>() {
            Ok(parsed) if parsed >= min && parsed <= max => {
                let index = (((parsed - min) / width).floor() as usize).min(bin_count - 1);
                bins[index].count += 1;
            }
            _ => invalid += 1,
        }
    }
    ResultSummary::Histogram { bins, invalid }
}

fn tally_choices(pair: &QuestionAnswers, choices: &[String]) -> ResultSummary {
    let mut tallies: Vec<OptionTally> = choices
        .iter()
        .map(|choice| OptionTally {
            choice: choice.clone(),
            count: 0,
        })
        .collect();
    let mut other = 0;
    for value in pair.answer_values() {
        match tallies.iter_mut().find(|tally| tally.choice == value.trim()) {
            Some(tally) => tally.count += 1,
            None => other += 1,
        }
    }
    ResultSummary::MultipleChoice { tallies, other }
}
