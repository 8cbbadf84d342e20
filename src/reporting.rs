//! # Reporting Module / 报告模块
//!
//! Rendering of the aggregate report model: a colored console summary,
//! a standalone HTML document and a machine-readable JSON artifact.
//!
//! 汇总报告模型的渲染：彩色控制台摘要、独立 HTML 文档和机器可读的 JSON 产物。

pub mod console;
pub mod html;
pub mod json;
