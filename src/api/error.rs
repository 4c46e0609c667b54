// ==========================================
// 面粉制粉产销计划系统 - API层错误类型
// ==========================================
// 职责: 定义API层错误类型,所有错误信息必须包含显式原因
// 说明: 引擎本体无失败态 (任何输入都产出可渲染指标);
//       这里的错误只覆盖控制器侧的调用时序/参数问题
// ==========================================

use thiserror::Error;

/// API层错误类型
#[derive(Error, Debug)]
pub enum ApiError {
    // ==========================================
    // 调用时序错误
    // ==========================================
    /// 基线尚未载入就发起查询/变更
    #[error("引擎未初始化: {0}")]
    EngineUninitialized(String),

    // ==========================================
    // 业务规则错误
    // ==========================================
    #[error("配方未找到: recipe_id={0}")]
    RecipeNotFound(String),

    #[error("无效输入: {0}")]
    InvalidInput(String),

    // ==========================================
    // 通用错误
    // ==========================================
    #[error("内部错误: {0}")]
    InternalError(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
