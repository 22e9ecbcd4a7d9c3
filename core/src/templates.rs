//! Static configuration tables: goal templates, experience modifiers, weekly
//! split patterns, periodization schedules and per-constraint safety notes.
//!
//! Every lookup is an exhaustive `match` over a closed enum, so an unknown key
//! cannot silently fall through to a default row.

use serde::{Deserialize, Serialize};

use crate::profile::{Constraint, ExperienceLevel, Goal};

// ---------------------------------------------------------------------------
// Goal templates
// ---------------------------------------------------------------------------

/// Share of a plan's volume per modality for one training objective.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalTemplate {
    pub goal: Goal,
    pub name: &'static str,
    pub name_zh: &'static str,
    pub description_zh: &'static str,
    pub strength_ratio: f64,
    pub cardio_ratio: f64,
    pub hiit_ratio: f64,
    pub mobility_ratio: f64,
}

impl GoalTemplate {
    /// A cardio finisher is appended to the main block above this share.
    pub fn wants_cardio(&self) -> bool {
        self.cardio_ratio > 0.2
    }

    /// A HIIT finisher is appended to the main block above this share.
    pub fn wants_hiit(&self) -> bool {
        self.hiit_ratio > 0.1
    }
}

const FAT_LOSS: GoalTemplate = GoalTemplate {
    goal: Goal::FatLoss,
    name: "Fat Loss",
    name_zh: "减脂",
    description_zh: "以力量训练保持肌肉，配合有氧与间歇训练提高能量消耗",
    strength_ratio: 0.4,
    cardio_ratio: 0.3,
    hiit_ratio: 0.2,
    mobility_ratio: 0.1,
};

const MUSCLE_GAIN: GoalTemplate = GoalTemplate {
    goal: Goal::MuscleGain,
    name: "Muscle Gain",
    name_zh: "增肌",
    description_zh: "以渐进超负荷的力量训练为主，促进肌肉增长",
    strength_ratio: 0.7,
    cardio_ratio: 0.1,
    hiit_ratio: 0.1,
    mobility_ratio: 0.1,
};

const FITNESS: GoalTemplate = GoalTemplate {
    goal: Goal::Fitness,
    name: "Overall Fitness",
    name_zh: "提升体能",
    description_zh: "力量、心肺与灵活性均衡发展，全面提升运动能力",
    strength_ratio: 0.4,
    cardio_ratio: 0.25,
    hiit_ratio: 0.2,
    mobility_ratio: 0.15,
};

const REHAB: GoalTemplate = GoalTemplate {
    goal: Goal::Rehab,
    name: "Rehabilitation",
    name_zh: "康复训练",
    description_zh: "低冲击、可控的动作恢复关节活动度与稳定性",
    strength_ratio: 0.3,
    cardio_ratio: 0.2,
    hiit_ratio: 0.0,
    mobility_ratio: 0.5,
};

const GENERAL: GoalTemplate = GoalTemplate {
    goal: Goal::General,
    name: "General Health",
    name_zh: "保持健康",
    description_zh: "规律运动，兼顾力量与有氧，维持良好的身体状态",
    strength_ratio: 0.45,
    cardio_ratio: 0.25,
    hiit_ratio: 0.1,
    mobility_ratio: 0.2,
};

pub fn goal_template(goal: Goal) -> &'static GoalTemplate {
    match goal {
        Goal::FatLoss => &FAT_LOSS,
        Goal::MuscleGain => &MUSCLE_GAIN,
        Goal::Fitness => &FITNESS,
        Goal::Rehab => &REHAB,
        Goal::General => &GENERAL,
    }
}

// ---------------------------------------------------------------------------
// Experience modifiers
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntensityLevel {
    Low,
    Moderate,
    High,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExperienceModifier {
    pub level: ExperienceLevel,
    pub volume_multiplier: f64,
    pub intensity: IntensityLevel,
    pub rest_multiplier: f64,
}

const BEGINNER: ExperienceModifier = ExperienceModifier {
    level: ExperienceLevel::Beginner,
    volume_multiplier: 0.7,
    intensity: IntensityLevel::Low,
    rest_multiplier: 1.2,
};

const INTERMEDIATE: ExperienceModifier = ExperienceModifier {
    level: ExperienceLevel::Intermediate,
    volume_multiplier: 1.0,
    intensity: IntensityLevel::Moderate,
    rest_multiplier: 1.0,
};

const ADVANCED: ExperienceModifier = ExperienceModifier {
    level: ExperienceLevel::Advanced,
    volume_multiplier: 1.3,
    intensity: IntensityLevel::High,
    rest_multiplier: 0.8,
};

pub fn experience_modifier(level: ExperienceLevel) -> &'static ExperienceModifier {
    match level {
        ExperienceLevel::Beginner => &BEGINNER,
        ExperienceLevel::Intermediate => &INTERMEDIATE,
        ExperienceLevel::Advanced => &ADVANCED,
    }
}

// ---------------------------------------------------------------------------
// Split patterns
// ---------------------------------------------------------------------------

/// What the main block of a day trains. The composer branches on this tag,
/// never on the human-readable label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FocusKind {
    UpperBody,
    LowerBody,
    FullBody,
    Push,
    Pull,
    Legs,
}

impl FocusKind {
    /// Number of (upper, lower) strength picks for the main block.
    pub const fn strength_picks(self) -> (usize, usize) {
        match self {
            FocusKind::UpperBody | FocusKind::Push | FocusKind::Pull => (3, 0),
            FocusKind::LowerBody | FocusKind::Legs => (0, 3),
            FocusKind::FullBody => (2, 2),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SplitDay {
    pub focus: FocusKind,
    pub label: &'static str,
    pub label_zh: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrainingSplit {
    pub days_per_week: u8,
    pub name: &'static str,
    pub name_zh: &'static str,
    pub days: &'static [SplitDay],
}

impl TrainingSplit {
    /// Split day for the given 0-based day index, cycling when the pattern is
    /// shorter than the week (fallback split).
    pub fn day(&self, index: usize) -> &'static SplitDay {
        &self.days[index % self.days.len()]
    }
}

const FULL_A: SplitDay = SplitDay {
    focus: FocusKind::FullBody,
    label: "Full Body A",
    label_zh: "全身训练 A",
};
const FULL_B: SplitDay = SplitDay {
    focus: FocusKind::FullBody,
    label: "Full Body B",
    label_zh: "全身训练 B",
};
const FULL: SplitDay = SplitDay {
    focus: FocusKind::FullBody,
    label: "Full Body",
    label_zh: "全身训练",
};
const UPPER: SplitDay = SplitDay {
    focus: FocusKind::UpperBody,
    label: "Upper Body",
    label_zh: "上肢力量",
};
const LOWER: SplitDay = SplitDay {
    focus: FocusKind::LowerBody,
    label: "Lower Body",
    label_zh: "下肢力量",
};
const PUSH: SplitDay = SplitDay {
    focus: FocusKind::Push,
    label: "Push",
    label_zh: "推（胸/肩/三头）",
};
const PULL: SplitDay = SplitDay {
    focus: FocusKind::Pull,
    label: "Pull",
    label_zh: "拉（背/二头）",
};
const LEGS: SplitDay = SplitDay {
    focus: FocusKind::Legs,
    label: "Legs",
    label_zh: "腿部训练",
};

pub const SPLITS: &[TrainingSplit] = &[
    TrainingSplit {
        days_per_week: 2,
        name: "Full Body x2",
        name_zh: "全身训练 ×2",
        days: &[FULL_A, FULL_B],
    },
    TrainingSplit {
        days_per_week: 3,
        name: "Upper / Lower / Full Body",
        name_zh: "上肢 / 下肢 / 全身",
        days: &[UPPER, LOWER, FULL],
    },
    TrainingSplit {
        days_per_week: 4,
        name: "Upper / Lower x2",
        name_zh: "上下肢分化 ×2",
        days: &[UPPER, LOWER, UPPER, LOWER],
    },
    TrainingSplit {
        days_per_week: 5,
        name: "Push / Pull / Legs / Upper / Lower",
        name_zh: "推 / 拉 / 腿 / 上肢 / 下肢",
        days: &[PUSH, PULL, LEGS, UPPER, LOWER],
    },
    TrainingSplit {
        days_per_week: 6,
        name: "Push / Pull / Legs x2",
        name_zh: "推拉腿 ×2",
        days: &[PUSH, PULL, LEGS, PUSH, PULL, LEGS],
    },
];

/// Split for the given weekly day count; anything without an exact row uses
/// the 2-day split.
pub fn split_for_days(days_per_week: u8) -> &'static TrainingSplit {
    SPLITS
        .iter()
        .find(|s| s.days_per_week == days_per_week)
        .unwrap_or(&SPLITS[0])
}

// ---------------------------------------------------------------------------
// Periodization
// ---------------------------------------------------------------------------

/// One row of a periodization schedule (a week inside a month, or a month
/// inside a quarter).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressionStep {
    pub index: u32,
    pub name: &'static str,
    pub name_zh: &'static str,
    pub volume_multiplier: f64,
    pub deload: bool,
    pub notes_zh: &'static str,
}

pub const MONTH_PROGRESSION: [ProgressionStep; 4] = [
    ProgressionStep {
        index: 1,
        name: "Adaptation",
        name_zh: "适应期",
        volume_multiplier: 0.9,
        deload: false,
        notes_zh: "熟悉动作模式，控制强度",
    },
    ProgressionStep {
        index: 2,
        name: "Accumulation",
        name_zh: "积累期",
        volume_multiplier: 1.0,
        deload: false,
        notes_zh: "按计划完成标准训练量",
    },
    ProgressionStep {
        index: 3,
        name: "Intensification",
        name_zh: "强化期",
        volume_multiplier: 1.1,
        deload: false,
        notes_zh: "适度增加训练量，注意动作质量",
    },
    ProgressionStep {
        index: 4,
        name: "Deload",
        name_zh: "减载期",
        volume_multiplier: 0.7,
        deload: true,
        notes_zh: "降低训练量，促进恢复",
    },
];

pub const QUARTER_PROGRESSION: [ProgressionStep; 3] = [
    ProgressionStep {
        index: 1,
        name: "Foundation",
        name_zh: "基础期",
        volume_multiplier: 0.9,
        deload: false,
        notes_zh: "建立训练习惯与动作基础",
    },
    ProgressionStep {
        index: 2,
        name: "Build",
        name_zh: "进阶期",
        volume_multiplier: 1.1,
        deload: false,
        notes_zh: "逐步提升训练量与强度",
    },
    ProgressionStep {
        index: 3,
        name: "Peak",
        name_zh: "巅峰期",
        volume_multiplier: 1.15,
        deload: false,
        notes_zh: "冲刺阶段，巩固训练成果",
    },
];

// ---------------------------------------------------------------------------
// Safety notes
// ---------------------------------------------------------------------------

pub const GENERIC_SAFETY_NOTE: &str =
    "训练前请充分热身，训练后进行拉伸放松；如有任何不适请立即停止并咨询专业人士。";

/// Caution text for one constraint. `Other` is handled by the caller because
/// it echoes the user's own notes.
pub fn constraint_caution(constraint: Constraint) -> &'static str {
    match constraint {
        Constraint::KneeIssue => "膝盖不适：避免跳跃等高冲击动作和深蹲，下肢训练控制幅度。",
        Constraint::BackIssue => "腰背不适：避免大重量硬拉和负重弯腰，全程保持脊柱中立。",
        Constraint::ShoulderIssue => "肩部不适：避免过顶推举和大幅度肩部动作。",
        Constraint::WristIssue => "手腕不适：减少俯卧撑等手腕承重动作。",
        Constraint::AnkleIssue => "脚踝不适：避免跳跃和快速变向，必要时佩戴护踝。",
        Constraint::Hypertension => "高血压：避免憋气发力和高强度间歇，保持均匀呼吸。",
        Constraint::Other => "其他身体限制：请根据自身情况调整或跳过不适动作。",
    }
}
