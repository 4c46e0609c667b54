// ==========================================
// 面粉制粉产销计划系统 - 配方适用矩阵
// ==========================================
// 职责: (面粉品类, 配方) 适用对的只读参考数据
// 红线: 矩阵仅作展示参考 (advisory),引擎不据此拦截任何调整
// ==========================================

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

// ==========================================
// EligibilityRow - 适用矩阵行 (后端数据形状)
// ==========================================
// 来源: 数据API /api/planning/recipe-eligibility
// 说明: is_eligible 缺省时,行的存在本身即视为适用
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EligibilityRow {
    pub recipe_id: String,       // 配方ID
    pub recipe_name: String,     // 配方名称
    pub flour_type_id: String,   // 面粉品类ID
    pub flour_type: String,      // 面粉品类名称
    #[serde(default)]
    pub is_eligible: Option<bool>, // 是否适用 (缺省=适用)
}

// ==========================================
// EligibilityMatrix - 适用矩阵
// ==========================================
// 本引擎范围内矩阵不随时间变化: 上游按周期给什么,这里就当什么是当前真值
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EligibilityMatrix {
    // (flour_type_id, recipe_id) 适用对
    pairs: BTreeSet<(String, String)>,
    // 展示名称
    flour_names: BTreeMap<String, String>,
    recipe_names: BTreeMap<String, String>,
}

impl EligibilityMatrix {
    /// 由后端行构建矩阵
    pub fn from_rows(rows: &[EligibilityRow]) -> Self {
        let mut matrix = EligibilityMatrix::default();

        for row in rows {
            if row.is_eligible == Some(false) {
                continue;
            }

            matrix
                .pairs
                .insert((row.flour_type_id.clone(), row.recipe_id.clone()));
            matrix
                .flour_names
                .insert(row.flour_type_id.clone(), row.flour_type.clone());
            matrix
                .recipe_names
                .insert(row.recipe_id.clone(), row.recipe_name.clone());
        }

        matrix
    }

    /// 判断 (面粉品类, 配方) 是否适用
    pub fn is_eligible(&self, flour_type_id: &str, recipe_id: &str) -> bool {
        self.pairs
            .contains(&(flour_type_id.to_string(), recipe_id.to_string()))
    }

    /// 某面粉品类可用的配方ID列表
    pub fn eligible_recipes(&self, flour_type_id: &str) -> Vec<String> {
        self.pairs
            .iter()
            .filter(|(f, _)| f == flour_type_id)
            .map(|(_, r)| r.clone())
            .collect()
    }

    /// 全部面粉品类ID列表
    pub fn flour_types(&self) -> Vec<String> {
        self.flour_names.keys().cloned().collect()
    }

    /// 面粉品类展示名称
    pub fn flour_type_name(&self, flour_type_id: &str) -> Option<&str> {
        self.flour_names.get(flour_type_id).map(|s| s.as_str())
    }

    /// 适用对总数
    pub fn pair_count(&self) -> usize {
        self.pairs.len()
    }
}
