//! 翻译服务：翻译器接口、配置与编排

pub mod config;
pub mod http;
pub mod orchestrator;
pub mod translator;
