//! Names of the columns the classifier and validator add to a frame.

pub const BALDS_COUNT: &str = "balds_count";
pub const IALDS_COUNT: &str = "ialds_count";
pub const DISEASES_COUNT: &str = "diseases_count";
pub const CFS_SCORE: &str = "cfs_score";
pub const CFS_RULE: &str = "cfs_rule";
pub const EXPECTED_CFS: &str = "expected_cfs";
pub const CHECK_PASS: &str = "check_pass";
pub const CFS_LABEL: &str = "cfs_label";
pub const CFS_GROUP: &str = "cfs_group";

pub const COUNT_COLUMNS: [&str; 3] = [BALDS_COUNT, IALDS_COUNT, DISEASES_COUNT];
