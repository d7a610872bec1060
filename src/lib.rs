// Rapidgator API v2 Rust 客户端库

// 配置管理模块
pub mod config;

// 错误类型
pub mod error;

// 内容哈希
pub mod hash;

// 日志系统
pub mod logging;

// 网盘API模块
pub mod netdisk;

// 导出常用类型
pub use config::{ClientConfig, LogConfig};
pub use error::{Error, Result};
pub use hash::ContentHash;
pub use netdisk::{
    Envelope, FileItem, FileMode, FolderContentOptions, FolderItem, IdList, RapidgatorClient,
    UploadRequest,
};
