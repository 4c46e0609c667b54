// ==========================================
// 面粉制粉产销计划系统 - 周期解析引擎
// ==========================================
// 职责: (日期, 粒度) -> 规范周期标签; (自定义区间) -> 粒度
// 红线: 纯函数,无 I/O,同输入必同输出 (上游拿它做缓存键)
// 失败语义: 日期解析失败退回"今天",绝不抛错;
//           图表层没有周期缺失的错误态可渲染 (可用性优先于严格性)
// ==========================================

use crate::config::HorizonPolicy;
use crate::domain::types::{Horizon, PeriodTag};
use chrono::{Datelike, Local, NaiveDate};

// ==========================================
// PeriodResolver - 周期解析引擎
// ==========================================
// 无状态引擎,所有方法都是纯函数
pub struct PeriodResolver {
    horizon_policy: HorizonPolicy,
}

impl PeriodResolver {
    /// 使用默认粒度阈值构造
    pub fn new() -> Self {
        Self::with_policy(HorizonPolicy::default())
    }

    /// 使用指定粒度阈值构造
    pub fn with_policy(horizon_policy: HorizonPolicy) -> Self {
        Self { horizon_policy }
    }

    // ==========================================
    // 核心方法
    // ==========================================

    /// 由日期与粒度生成规范周期标签
    ///
    /// # 规则
    /// - month: "YYYY-MM"
    /// - year: "YYYY"
    /// - week: ISO-8601 "YYYY-Www" (周一起始,第1周为包含该年
    ///   第一个周四的周); 年末/年初必须用 ISO 周年而非日历年,
    ///   例如 2024-12-30 属于 2025-W01
    pub fn period_from_date(&self, date: NaiveDate, horizon: Horizon) -> PeriodTag {
        match horizon {
            Horizon::Week => {
                let iso = date.iso_week();
                format!("{:04}-W{:02}", iso.year(), iso.week())
            }
            Horizon::Month => format!("{:04}-{:02}", date.year(), date.month()),
            Horizon::Year => format!("{:04}", date.year()),
        }
    }

    /// 由日期字符串生成周期标签
    ///
    /// 接受 "YYYY-MM-DD",也容忍带时间的 RFC3339 形式 (取日期部分)。
    /// 解析失败退回当前日期并记 warn,保证总能返回可渲染的周期。
    pub fn period_from_str(&self, date: &str, horizon: Horizon) -> PeriodTag {
        self.period_from_date(self.parse_date_or_today(date), horizon)
    }

    /// 由自定义区间挑选粒度
    ///
    /// # 规则
    /// 取能保持分桶数可渲染的最粗粒度:
    /// - 跨度 <= week_max_days (约10天): week
    /// - 跨度 <= month_max_days (约4个月): month
    /// - 更长: year
    ///
    /// # 边界
    /// - from > to 视为写反,交换后处理,不报错
    /// - 零长度区间 (from == to) 返回 week
    pub fn horizon_for_range(&self, from: NaiveDate, to: NaiveDate) -> Horizon {
        let (from, to) = if from > to { (to, from) } else { (from, to) };

        let span_days = (to - from).num_days();

        if span_days <= self.horizon_policy.week_max_days {
            Horizon::Week
        } else if span_days <= self.horizon_policy.month_max_days {
            Horizon::Month
        } else {
            Horizon::Year
        }
    }

    /// 由日期字符串区间挑选粒度 (任一端解析失败退回当前日期)
    pub fn horizon_for_range_str(&self, from: &str, to: &str) -> Horizon {
        self.horizon_for_range(
            self.parse_date_or_today(from),
            self.parse_date_or_today(to),
        )
    }

    // ==========================================
    // 内部方法
    // ==========================================

    /// 解析日期字符串,失败退回今天
    fn parse_date_or_today(&self, date: &str) -> NaiveDate {
        let trimmed = date.trim();

        if let Ok(d) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
            return d;
        }

        // 容忍 "YYYY-MM-DDTHH:MM:SS..." 形式: 取前10位再试一次
        if let Some(prefix) = trimmed.get(..10) {
            if let Ok(d) = NaiveDate::parse_from_str(prefix, "%Y-%m-%d") {
                return d;
            }
        }

        let today = Local::now().date_naive();
        tracing::warn!(input = %date, fallback = %today, "日期解析失败,退回当前日期");
        today
    }
}

impl Default for PeriodResolver {
    fn default() -> Self {
        Self::new()
    }
}
