//! # yxip-sync-core
//!
//! 优选 IP 聚合 → 分类 → 选优 → DNS 调和的批处理管线。
//!
//! 一次运行的控制流：
//!
//! ```text
//! SourceAdapter × N ─→ aggregate ─→ select ─→ ┬─ snapshot
//!        (抓取)          (清洗/分类)   (Top-K)  └─ Reconciler ─→ ZoneApi
//! ```
//!
//! - [`sources`]：每个测速源站一个适配器，失败降级为空贡献；
//! - [`aggregate`](aggregate::aggregate)：合并各源的行，丢弃脏数据，按线路名分类运营商；
//! - [`select`](select::select)：每运营商去重、按延迟排序、截取 Top-K；
//! - [`snapshot`]：人类可读的选优结果工件，整文件覆盖写；
//! - [`reconcile`](reconcile::Reconciler)：清空托管主机名下的旧记录，等待生效，
//!   再幂等补建新记录，全程限速、尽力而为。
//!
//! 管线内没有致命错误：任何子集的源失败、零条候选、部分 DNS 调用失败，
//! 都是合法的运行结果，以日志和 [`ReconcileSummary`] 计数呈现。

pub mod aggregate;
pub mod classify;
pub mod error;
pub mod reconcile;
pub mod select;
pub mod snapshot;
pub mod sources;
pub mod types;

pub use aggregate::aggregate;
pub use classify::classify;
pub use error::{CoreError, CoreResult};
pub use reconcile::{ReconcileOptions, Reconciler};
pub use select::{SelectOptions, select};
pub use snapshot::{format_snapshot, write_snapshot};
pub use sources::SourceAdapter;
pub use types::{CandidateRecord, OperatorTag, RawCandidate, ReconcileSummary, SelectionResult};
