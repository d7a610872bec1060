// 上传前的文件哈希计算
//
// Rapidgator 上传协商只需要整个文件的 MD5 和字节数：
// 服务器已有相同内容时直接完成上传（秒传），否则返回上传地址

use crate::error::Result;
use md5::Context as Md5Context;
use std::io::Read;
use std::path::Path;
use tracing::debug;

/// 上传协商所需的哈希信息
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentHash {
    /// 完整内容 MD5（小写十六进制）
    pub md5: String,
    /// 字节数
    pub size: u64,
}

impl ContentHash {
    /// 计算内存数据的哈希
    pub fn from_bytes(data: &[u8]) -> Self {
        Self {
            md5: format!("{:x}", md5::compute(data)),
            size: data.len() as u64,
        }
    }

    /// 计算本地文件的哈希
    ///
    /// 文件 I/O 在阻塞线程池中执行
    pub async fn from_path(path: &Path) -> Result<Self> {
        let path = path.to_path_buf();
        tokio::task::spawn_blocking(move || Self::from_path_sync(&path))
            .await
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?
    }

    fn from_path_sync(path: &Path) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        let size = file.metadata()?.len();

        let mut reader = std::io::BufReader::with_capacity(1024 * 1024, file);
        let mut hasher = Md5Context::new();
        let mut buffer = [0u8; 65536]; // 64KB 缓冲区

        loop {
            let bytes_read = reader.read(&mut buffer)?;
            if bytes_read == 0 {
                break;
            }
            hasher.consume(&buffer[..bytes_read]);
        }

        let md5 = format!("{:x}", hasher.compute());
        debug!("文件哈希计算完成: path={:?}, size={}, md5={}", path, size, md5);

        Ok(Self { md5, size })
    }
}
