//! Built-in exercise catalog.
//!
//! Reference data only: the table is `'static` and never mutated at runtime.

use serde::{Deserialize, Serialize};

use crate::profile::{Constraint, Equipment, impl_from_str};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExerciseCategory {
    Warmup,
    Upper,
    Lower,
    Core,
    Cardio,
    Hiit,
    Stretch,
}

impl ExerciseCategory {
    pub const ALL: [ExerciseCategory; 7] = [
        ExerciseCategory::Warmup,
        ExerciseCategory::Upper,
        ExerciseCategory::Lower,
        ExerciseCategory::Core,
        ExerciseCategory::Cardio,
        ExerciseCategory::Hiit,
        ExerciseCategory::Stretch,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            ExerciseCategory::Warmup => "warmup",
            ExerciseCategory::Upper => "upper",
            ExerciseCategory::Lower => "lower",
            ExerciseCategory::Core => "core",
            ExerciseCategory::Cardio => "cardio",
            ExerciseCategory::Hiit => "hiit",
            ExerciseCategory::Stretch => "stretch",
        }
    }
}

impl_from_str!(ExerciseCategory, "exercise category");

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Exercise {
    pub id: &'static str,
    pub name: &'static str,
    pub name_zh: &'static str,
    pub category: ExerciseCategory,
    /// Empty means bodyweight.
    pub equipment: &'static [Equipment],
    /// Body limitations this exercise is unsafe for.
    pub contraindications: &'static [Constraint],
    pub high_impact: bool,
}

impl Exercise {
    pub fn is_bodyweight(&self) -> bool {
        self.equipment.is_empty()
    }

    /// Plank-type holds are prescribed by time, not reps.
    pub fn is_plank_hold(&self) -> bool {
        self.id.contains("plank")
    }
}

const fn ex(
    id: &'static str,
    name: &'static str,
    name_zh: &'static str,
    category: ExerciseCategory,
    equipment: &'static [Equipment],
    contraindications: &'static [Constraint],
    high_impact: bool,
) -> Exercise {
    Exercise {
        id,
        name,
        name_zh,
        category,
        equipment,
        contraindications,
        high_impact,
    }
}

use Constraint::{AnkleIssue, BackIssue, Hypertension, KneeIssue, ShoulderIssue, WristIssue};
use Equipment::{Barbell, Bench, Dumbbells, Gym, JumpRope, Kettlebell, PullUpBar, ResistanceBand};
use ExerciseCategory::{Cardio, Core, Hiit, Lower, Stretch, Upper, Warmup};

pub const EXERCISES: &[Exercise] = &[
    // Warm-up
    ex("jumping_jacks", "Jumping Jacks", "开合跳", Warmup, &[], &[KneeIssue, AnkleIssue], true),
    ex("arm_circles", "Arm Circles", "手臂绕环", Warmup, &[], &[], false),
    ex("hip_circles", "Hip Circles", "髋关节绕环", Warmup, &[], &[], false),
    ex("leg_swings", "Leg Swings", "腿部摆动", Warmup, &[], &[], false),
    ex("cat_cow", "Cat-Cow", "猫牛式", Warmup, &[], &[], false),
    ex("march_in_place", "March in Place", "原地踏步", Warmup, &[], &[], false),
    ex("high_knees", "High Knees", "高抬腿跑", Warmup, &[], &[KneeIssue, AnkleIssue, Hypertension], true),
    ex("inchworm", "Inchworm", "尺蠖式", Warmup, &[], &[WristIssue, BackIssue], false),
    ex("band_shoulder_dislocates", "Band Shoulder Dislocates", "弹力带肩部绕环", Warmup, &[ResistanceBand], &[ShoulderIssue], false),
    // Upper body
    ex("push_up", "Push-up", "俯卧撑", Upper, &[], &[WristIssue, ShoulderIssue], false),
    ex("incline_push_up", "Incline Push-up", "上斜俯卧撑", Upper, &[], &[WristIssue], false),
    ex("pike_push_up", "Pike Push-up", "屈体俯卧撑", Upper, &[], &[ShoulderIssue, WristIssue, Hypertension], false),
    ex("chair_dip", "Chair Dip", "椅子臂屈伸", Upper, &[], &[ShoulderIssue, WristIssue], false),
    ex("prone_y_raise", "Prone Y Raise", "俯卧Y字上举", Upper, &[], &[], false),
    ex("dumbbell_bench_press", "Dumbbell Bench Press", "哑铃卧推", Upper, &[Dumbbells, Bench], &[ShoulderIssue], false),
    ex("dumbbell_row", "Dumbbell Row", "哑铃划船", Upper, &[Dumbbells], &[BackIssue], false),
    ex("dumbbell_shoulder_press", "Dumbbell Shoulder Press", "哑铃推举", Upper, &[Dumbbells], &[ShoulderIssue, Hypertension], false),
    ex("barbell_bench_press", "Barbell Bench Press", "杠铃卧推", Upper, &[Barbell, Bench], &[ShoulderIssue], false),
    ex("barbell_row", "Barbell Row", "杠铃划船", Upper, &[Barbell], &[BackIssue], false),
    ex("overhead_press", "Barbell Overhead Press", "杠铃推举", Upper, &[Barbell], &[ShoulderIssue, BackIssue, Hypertension], false),
    ex("pull_up", "Pull-up", "引体向上", Upper, &[PullUpBar], &[ShoulderIssue], false),
    ex("band_row", "Band Row", "弹力带划船", Upper, &[ResistanceBand], &[], false),
    ex("band_pull_apart", "Band Pull-apart", "弹力带扩胸", Upper, &[ResistanceBand], &[], false),
    ex("kettlebell_press", "Kettlebell Press", "壶铃推举", Upper, &[Kettlebell], &[ShoulderIssue], false),
    ex("lat_pulldown", "Lat Pulldown", "高位下拉", Upper, &[Gym], &[ShoulderIssue], false),
    // Lower body
    ex("bodyweight_squat", "Bodyweight Squat", "徒手深蹲", Lower, &[], &[KneeIssue], false),
    ex("glute_bridge", "Glute Bridge", "臀桥", Lower, &[], &[], false),
    ex("reverse_lunge", "Reverse Lunge", "后撤步弓步", Lower, &[], &[KneeIssue], false),
    ex("jump_squat", "Jump Squat", "跳跃深蹲", Lower, &[], &[KneeIssue, AnkleIssue, Hypertension], true),
    ex("wall_sit", "Wall Sit", "靠墙静蹲", Lower, &[], &[KneeIssue, Hypertension], false),
    ex("calf_raise", "Calf Raise", "提踵", Lower, &[], &[AnkleIssue], false),
    ex("side_lying_leg_raise", "Side-lying Leg Raise", "侧卧抬腿", Lower, &[], &[], false),
    ex("single_leg_rdl", "Single-leg Romanian Deadlift", "单腿罗马尼亚硬拉", Lower, &[], &[BackIssue, AnkleIssue], false),
    ex("goblet_squat", "Goblet Squat", "高脚杯深蹲", Lower, &[Dumbbells], &[KneeIssue], false),
    ex("dumbbell_rdl", "Dumbbell Romanian Deadlift", "哑铃罗马尼亚硬拉", Lower, &[Dumbbells], &[BackIssue], false),
    ex("barbell_back_squat", "Barbell Back Squat", "杠铃深蹲", Lower, &[Barbell], &[KneeIssue, BackIssue], false),
    ex("barbell_deadlift", "Barbell Deadlift", "杠铃硬拉", Lower, &[Barbell], &[BackIssue, Hypertension], false),
    ex("kettlebell_swing", "Kettlebell Swing", "壶铃摆荡", Lower, &[Kettlebell], &[BackIssue], false),
    ex("band_lateral_walk", "Band Lateral Walk", "弹力带侧向行走", Lower, &[ResistanceBand], &[], false),
    ex("leg_press", "Leg Press", "腿举", Lower, &[Gym], &[KneeIssue], false),
    ex("box_jump", "Box Jump", "跳箱", Lower, &[Bench], &[KneeIssue, AnkleIssue], true),
    // Core
    ex("plank", "Forearm Plank", "平板支撑", Core, &[], &[ShoulderIssue], false),
    ex("side_plank", "Side Plank", "侧平板支撑", Core, &[], &[ShoulderIssue], false),
    ex("dead_bug", "Dead Bug", "死虫式", Core, &[], &[], false),
    ex("bird_dog", "Bird Dog", "鸟狗式", Core, &[], &[], false),
    ex("crunch", "Crunch", "卷腹", Core, &[], &[BackIssue], false),
    ex("bicycle_crunch", "Bicycle Crunch", "单车卷腹", Core, &[], &[BackIssue], false),
    ex("russian_twist", "Russian Twist", "俄罗斯转体", Core, &[], &[BackIssue], false),
    ex("pallof_press", "Pallof Press", "抗旋转推", Core, &[ResistanceBand], &[], false),
    ex("hanging_knee_raise", "Hanging Knee Raise", "悬垂举腿", Core, &[PullUpBar], &[ShoulderIssue], false),
    // Cardio
    ex("brisk_walk", "Brisk Walk", "快走", Cardio, &[], &[], false),
    ex("jogging", "Jogging", "慢跑", Cardio, &[], &[KneeIssue, AnkleIssue], true),
    ex("jump_rope", "Jump Rope", "跳绳", Cardio, &[JumpRope], &[KneeIssue, AnkleIssue], true),
    ex("stationary_bike", "Stationary Bike", "动感单车", Cardio, &[Gym], &[], false),
    ex("rowing_machine", "Rowing Machine", "划船机", Cardio, &[Gym], &[BackIssue], false),
    ex("stair_climb", "Stair Climb", "爬楼梯", Cardio, &[], &[KneeIssue], false),
    ex("shadow_boxing", "Shadow Boxing", "空击拳", Cardio, &[], &[], false),
    // HIIT
    ex("burpee", "Burpee", "波比跳", Hiit, &[], &[KneeIssue, WristIssue, AnkleIssue, BackIssue, Hypertension], true),
    ex("mountain_climber", "Mountain Climber", "登山跑", Hiit, &[], &[WristIssue, Hypertension], true),
    ex("tuck_jump", "Tuck Jump", "收腹跳", Hiit, &[], &[KneeIssue, AnkleIssue, BackIssue], true),
    ex("skater_jump", "Skater Jump", "滑冰跳", Hiit, &[], &[KneeIssue, AnkleIssue], true),
    ex("fast_feet", "Fast Feet", "小碎步", Hiit, &[], &[AnkleIssue], false),
    ex("step_jacks", "Step Jacks", "低冲击开合", Hiit, &[], &[], false),
    ex("jump_rope_sprint", "Jump Rope Sprint", "跳绳冲刺", Hiit, &[JumpRope], &[KneeIssue, AnkleIssue, Hypertension], true),
    // Stretch
    ex("hamstring_stretch", "Hamstring Stretch", "腘绳肌拉伸", Stretch, &[], &[], false),
    ex("quad_stretch", "Standing Quad Stretch", "股四头肌拉伸", Stretch, &[], &[KneeIssue], false),
    ex("hip_flexor_stretch", "Hip Flexor Stretch", "髋屈肌拉伸", Stretch, &[], &[], false),
    ex("chest_doorway_stretch", "Doorway Chest Stretch", "门框胸部拉伸", Stretch, &[], &[ShoulderIssue], false),
    ex("child_pose", "Child's Pose", "婴儿式", Stretch, &[], &[KneeIssue], false),
    ex("cross_body_shoulder_stretch", "Cross-body Shoulder Stretch", "交叉肩部拉伸", Stretch, &[], &[], false),
    ex("calf_stretch", "Calf Stretch", "小腿拉伸", Stretch, &[], &[], false),
    ex("cobra_stretch", "Cobra Stretch", "眼镜蛇式", Stretch, &[], &[BackIssue, WristIssue], false),
    ex("figure_four_stretch", "Figure-four Stretch", "仰卧4字拉伸", Stretch, &[], &[], false),
    ex("neck_stretch", "Neck Stretch", "颈部拉伸", Stretch, &[], &[], false),
];

pub fn all() -> &'static [Exercise] {
    EXERCISES
}

/// All exercises of one category, in catalog order.
pub fn pool(category: ExerciseCategory) -> Vec<&'static Exercise> {
    EXERCISES
        .iter()
        .filter(|e| e.category == category)
        .collect()
}

pub fn find(id: &str) -> Option<&'static Exercise> {
    EXERCISES.iter().find(|e| e.id == id)
}
