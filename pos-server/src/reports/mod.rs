//! Reporting Module
//!
//! 报表 = 纯函数：给定时间窗口和窗口内的交易/订单快照，
//! 计算营收汇总、环比增长、各维度分解和热销排行。
//! 数据库访问留在 API 层，这里只做聚合。

pub mod engine;
pub mod window;

pub use engine::{
    DailyBucket, OrderTypeCount, PaymentBreakdownEntry, ReportSummary, RevenuePoint, TopItem,
    WeeklyBucket,
};
pub use window::ReportWindow;
