//! Questionnaire configuration.
//!
//! Everything the pipeline needs to know about one questionnaire version lives
//! in [`SurveyStandards`]: the header mapping table, the Likert labels, the GPA
//! bands and the reverse-coded items. The built-in values describe the
//! Vietnamese student wellbeing survey; a TOML file may override any field.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use unicode_normalization::UnicodeNormalization;

use crate::error::StandardsError;

/// Trimmed text in Unicode NFC. Exports may carry decomposed Vietnamese
/// ("e" + U+0302 + U+0301 instead of "ế").
pub fn normalize_label(text: &str) -> String {
    text.trim().nfc().collect()
}

/// One raw question header and the canonical field it becomes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnMapping {
    pub raw: String,
    pub canonical: String,
}

/// One agreement label and its ordinal code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LikertLevel {
    pub label: String,
    pub code: i64,
}

/// A GPA reporting band, closed at `lower` and open at `upper` unless
/// `closed_upper` is set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GpaBand {
    pub label: String,
    pub lower: f64,
    pub upper: f64,
    #[serde(default)]
    pub closed_upper: bool,
}

impl GpaBand {
    pub fn contains(&self, gpa: f64) -> bool {
        if gpa < self.lower {
            return false;
        }
        if self.closed_upper {
            gpa <= self.upper
        } else {
            gpa < self.upper
        }
    }
}

/// A GPA range label offered by the questionnaire, read as its midpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GpaLabel {
    pub label: String,
    pub value: f64,
}

/// A named run of semesters (freshman, junior, senior).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SemesterStage {
    pub label: String,
    pub first: i64,
    pub last: i64,
}

impl SemesterStage {
    pub fn contains(&self, semester: i64) -> bool {
        (self.first..=self.last).contains(&semester)
    }
}

/// The planted question and the only answer an attentive respondent gives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttentionCheck {
    pub column: String,
    pub expected: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SurveyStandards {
    pub column_mapping: Vec<ColumnMapping>,
    pub likert_scale: Vec<LikertLevel>,
    pub gpa_bands: Vec<GpaBand>,
    pub gpa_labels: Vec<GpaLabel>,
    pub semester_stages: Vec<SemesterStage>,
    pub reverse_coded: Vec<String>,
    pub pii_columns: Vec<String>,
    pub attention: AttentionCheck,
    /// Item read by the retention-risk metric.
    pub loyalty_field: String,
    /// Reverse-coded worry item excluded from the satisfaction reading.
    pub worry_field: String,
}

impl Default for SurveyStandards {
    fn default() -> Self {
        Self::builtin()
    }
}

fn mapping(raw: &str, canonical: &str) -> ColumnMapping {
    ColumnMapping {
        raw: raw.to_string(),
        canonical: canonical.to_string(),
    }
}

fn band(label: &str, lower: f64, upper: f64, closed_upper: bool) -> GpaBand {
    GpaBand {
        label: label.to_string(),
        lower,
        upper,
        closed_upper,
    }
}

impl SurveyStandards {
    /// The student wellbeing questionnaire.
    pub fn builtin() -> Self {
        let column_mapping = vec![
            mapping("Dấu thời gian", "timestamp"),
            mapping("Tên người dùng", "email"),
            mapping("Xác nhận đồng ý tham gia khảo sát:", "consent"),
            mapping("Bạn là sinh viên của ngành:", "dem_major"),
            mapping("Bạn đang học ở kỳ:", "dem_semester"),
            mapping("GPA hiện tại của bạn:", "dem_gpa"),
            mapping("Tình trạng cư trú của bạn hiện tại:", "dem_residence"),
            mapping(
                "Nhìn chung, tôi cảm thấy hài lòng với cuộc sống hiện tại của mình.",
                "hap_general_satisfaction",
            ),
            mapping(
                "Tôi thường xuyên cảm thấy vui vẻ và tràn đầy năng lượng khi đến trường.",
                "hap_school_energy",
            ),
            mapping(
                "Tôi cảm thấy cuộc sống của mình tại FPoly có ý nghĩa và mục tiêu rõ ràng.",
                "hap_meaningful_life",
            ),
            mapping(
                "Nếu được chọn lại, tôi vẫn sẽ chọn học tại FPoly.",
                "hap_loyalty_choice",
            ),
            mapping(
                "Chương trình học hiện tại phù hợp với năng lực của tôi.",
                "aca_curriculum_fit",
            ),
            mapping(
                "Tôi cảm thấy áp lực nặng nề với tần suất Deadline/Assignment/Lab.",
                "aca_deadline_pressure",
            ),
            mapping(
                "Phương pháp giảng dạy của giảng viên tạo hứng thú cho tôi.",
                "aca_teaching_quality",
            ),
            mapping(
                "Hệ thống LMS/CMS/AP hoạt động ổn định, hỗ trợ tốt cho việc học.",
                "aca_lms_stability",
            ),
            mapping(
                "Cơ sở vật chất (phòng học, máy lạnh, wifi) đáp ứng tốt nhu cầu của tôi.",
                "env_facilities",
            ),
            mapping(
                "Tôi hài lòng với các dịch vụ tiện ích (giữ xe, canteen, thang máy).",
                "env_utilities",
            ),
            mapping(
                "Môi trường học tập tại FPoly năng động và cởi mở.",
                "env_dynamic_culture",
            ),
            mapping(
                "Tôi có những người bạn thân thiết tại trường để chia sẻ khó khăn.",
                "soc_friendship_support",
            ),
            mapping(
                "Tôi cảm thấy dễ dàng hòa nhập với các hoạt động phong trào/CLB tại trường.",
                "soc_activity_integration",
            ),
            mapping(
                "Tôi nhận được sự ủng hộ từ gia đình trong quá trình học tập.",
                "soc_family_support",
            ),
            mapping(
                "Học phí hiện tại tương xứng với chất lượng đào tạo nhận được.",
                "fin_tuition_value",
            ),
            mapping(
                "Tôi lo lắng về gánh nặng chi phí sinh hoạt hàng tháng.",
                "fin_living_cost_worry",
            ),
            mapping(
                "Tôi tự tin về cơ hội việc làm sau khi tốt nghiệp FPoly.",
                "fin_job_prospects",
            ),
            mapping(
                "Vui lòng chọn đáp án \"Không đồng ý\" cho câu hỏi này để chúng tôi biết bạn đang đọc kỹ.",
                "attention_check",
            ),
            mapping(
                "Nếu có một điều ước để làm sinh viên FPoly hạnh phúc hơn, bạn ước điều gì?",
                "wish",
            ),
        ];
        let likert_scale = [
            ("Hoàn toàn không đồng ý", 1),
            ("Không đồng ý", 2),
            ("Trung lập", 3),
            ("Đồng ý", 4),
            ("Hoàn toàn đồng ý", 5),
        ]
        .into_iter()
        .map(|(label, code)| LikertLevel {
            label: label.to_string(),
            code,
        })
        .collect();
        let gpa_labels = [
            ("<= 5.0", 4.5),
            ("(5.0 - 6.0]", 5.5),
            ("(6.0 - 7.0]", 6.5),
            ("(7.0 - 8.0]", 7.5),
            ("(8.0 - 9.0]", 8.5),
            (">= 9.0", 9.5),
        ]
        .into_iter()
        .map(|(label, value)| GpaLabel {
            label: label.to_string(),
            value,
        })
        .collect();
        let semester_stages = [("freshman", 1, 3), ("junior", 4, 6), ("senior", 7, 9)]
            .into_iter()
            .map(|(label, first, last)| SemesterStage {
                label: label.to_string(),
                first,
                last,
            })
            .collect();
        Self {
            column_mapping,
            likert_scale,
            gpa_bands: vec![
                band("<5.0", 0.0, 5.0, false),
                band("5.0-6.5", 5.0, 6.5, false),
                band("6.5-8.0", 6.5, 8.0, false),
                band(">8.0", 8.0, 10.0, true),
            ],
            gpa_labels,
            semester_stages,
            reverse_coded: vec![
                "aca_deadline_pressure".to_string(),
                "fin_living_cost_worry".to_string(),
            ],
            pii_columns: vec!["email".to_string(), "consent".to_string()],
            attention: AttentionCheck {
                column: "attention_check".to_string(),
                expected: "Không đồng ý".to_string(),
            },
            loyalty_field: "hap_loyalty_choice".to_string(),
            worry_field: "fin_living_cost_worry".to_string(),
        }
    }

    /// Canonical id for a raw header, if the table knows it.
    pub fn canonical_for(&self, raw: &str) -> Option<&str> {
        self.column_mapping
            .iter()
            .find(|entry| entry.raw == raw)
            .map(|entry| entry.canonical.as_str())
    }

    /// Ordinal code for an agreement label. Exact match first, then a
    /// case-insensitive one; both sides are compared in NFC.
    pub fn likert_code(&self, label: &str) -> Option<i64> {
        let wanted = normalize_label(label);
        if wanted.is_empty() {
            return None;
        }
        let labels: Vec<(String, i64)> = self
            .likert_scale
            .iter()
            .map(|level| (normalize_label(&level.label), level.code))
            .collect();
        if let Some((_, code)) = labels.iter().find(|(text, _)| *text == wanted) {
            return Some(*code);
        }
        let lowered = wanted.to_lowercase();
        labels
            .iter()
            .find(|(text, _)| text.to_lowercase() == lowered)
            .map(|(_, code)| *code)
    }

    /// Midpoint for a questionnaire GPA range label.
    pub fn gpa_label_value(&self, label: &str) -> Option<f64> {
        let trimmed = label.trim();
        self.gpa_labels
            .iter()
            .find(|entry| entry.label == trimmed)
            .map(|entry| entry.value)
    }

    pub fn gpa_band_for(&self, gpa: f64) -> Option<&GpaBand> {
        self.gpa_bands.iter().find(|band| band.contains(gpa))
    }

    pub fn semester_stage_for(&self, semester: i64) -> Option<&SemesterStage> {
        self.semester_stages
            .iter()
            .find(|stage| stage.contains(semester))
    }

    pub fn is_reverse_coded(&self, column: &str) -> bool {
        self.reverse_coded.iter().any(|name| name == column)
    }

    /// Check internal consistency.
    pub fn validate(&self) -> Result<(), StandardsError> {
        let mut targets = BTreeSet::new();
        for entry in &self.column_mapping {
            if !targets.insert(entry.canonical.as_str()) {
                return Err(StandardsError::DuplicateTarget {
                    canonical: entry.canonical.clone(),
                });
            }
        }

        let mut codes = BTreeSet::new();
        for level in &self.likert_scale {
            if !(1..=5).contains(&level.code) {
                return Err(StandardsError::InvalidLikertCode {
                    label: level.label.clone(),
                    code: level.code,
                });
            }
            if !codes.insert(level.code) {
                return Err(StandardsError::Invalid {
                    message: format!("Likert code {} is assigned twice", level.code),
                });
            }
        }

        let mut previous_upper: Option<f64> = None;
        for band in &self.gpa_bands {
            if band.lower >= band.upper {
                return Err(StandardsError::InvalidGpaBand {
                    label: band.label.clone(),
                    message: format!("lower {} is not below upper {}", band.lower, band.upper),
                });
            }
            if let Some(upper) = previous_upper
                && band.lower < upper
            {
                return Err(StandardsError::InvalidGpaBand {
                    label: band.label.clone(),
                    message: format!("overlaps the previous band ending at {upper}"),
                });
            }
            previous_upper = Some(band.upper);
        }

        if self.attention.column.trim().is_empty() {
            return Err(StandardsError::Invalid {
                message: "attention check column is empty".to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_is_consistent() {
        SurveyStandards::builtin().validate().expect("builtin standards");
    }

    #[test]
    fn decomposed_labels_resolve() {
        let standards = SurveyStandards::builtin();
        let decomposed: String = "Hoàn toàn đồng ý".nfd().collect();
        assert_ne!(decomposed, "Hoàn toàn đồng ý");
        assert_eq!(standards.likert_code(&decomposed), Some(5));
        let lowered: String = "không đồng ý".nfd().collect();
        assert_eq!(standards.likert_code(&lowered), Some(2));
        assert_eq!(normalize_label(&format!(" {decomposed} ")), "Hoàn toàn đồng ý");
    }

    #[test]
    fn semesters_fall_into_stages() {
        let standards = SurveyStandards::builtin();
        let stage = |semester| {
            standards
                .semester_stage_for(semester)
                .map(|stage| stage.label.as_str())
        };
        assert_eq!(stage(1), Some("freshman"));
        assert_eq!(stage(6), Some("junior"));
        assert_eq!(stage(7), Some("senior"));
        assert_eq!(stage(0), None);
        assert_eq!(stage(10), None);
    }

    #[test]
    fn gpa_bands_are_left_closed() {
        let standards = SurveyStandards::builtin();
        assert_eq!(standards.gpa_band_for(6.4).map(|b| b.label.as_str()), Some("5.0-6.5"));
        assert_eq!(standards.gpa_band_for(6.5).map(|b| b.label.as_str()), Some("6.5-8.0"));
        assert_eq!(standards.gpa_band_for(10.0).map(|b| b.label.as_str()), Some(">8.0"));
        assert_eq!(standards.gpa_band_for(0.0).map(|b| b.label.as_str()), Some("<5.0"));
        assert!(standards.gpa_band_for(10.5).is_none());
        assert!(standards.gpa_band_for(-0.1).is_none());
    }

    #[test]
    fn likert_labels_resolve() {
        let standards = SurveyStandards::builtin();
        assert_eq!(standards.likert_code("Hoàn toàn không đồng ý"), Some(1));
        assert_eq!(standards.likert_code("  Đồng ý "), Some(4));
        assert_eq!(standards.likert_code("trung lập"), Some(3));
        assert_eq!(standards.likert_code("Có lẽ"), None);
        assert_eq!(standards.likert_code(""), None);
    }

    #[test]
    fn duplicate_targets_are_rejected() {
        let mut standards = SurveyStandards::builtin();
        standards.column_mapping.push(mapping("Another header", "dem_gpa"));
        assert!(matches!(
            standards.validate(),
            Err(StandardsError::DuplicateTarget { .. })
        ));
    }

    #[test]
    fn overlapping_bands_are_rejected() {
        let mut standards = SurveyStandards::builtin();
        standards.gpa_bands[1].lower = 4.0;
        assert!(matches!(
            standards.validate(),
            Err(StandardsError::InvalidGpaBand { .. })
        ));
    }
}
