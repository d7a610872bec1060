// 文件操作

use super::client::*;
use super::params::{
    FileIdParams, FileModeParams, FileRef, FileRenameParams, FileTransferParams, FileXcopyParams,
    HashCopyParams, IdList, OneTimeLinkCreateParams, OneTimeLinkInfoParams, OneTimeLinkOptions,
    UrlParams,
};
use super::{
    BatchData, DownloadLink, Envelope, FileData, FileMode, LinkCheck, OneTimeLinkData,
    OneTimeLinksData,
};
use crate::error::{Error, Result};
use tracing::{debug, info};

impl RapidgatorClient {
    /// 检查下载链接是否可访问
    pub async fn check_file_link(&self, url: &str) -> Result<Envelope<Vec<LinkCheck>>> {
        debug!("检查链接: {}", url);
        self.get_authed(API_FILE_CHECK_LINK, &UrlParams { url }).await
    }

    /// 批量检查下载链接（逗号拼接为一个请求）
    pub async fn check_file_links<S: AsRef<str>>(
        &self,
        urls: &[S],
    ) -> Result<Envelope<Vec<LinkCheck>>> {
        let joined = urls.iter().map(|u| u.as_ref()).collect::<Vec<_>>().join(",");
        debug!("批量检查链接: {} 个", urls.len());
        self.get_authed(API_FILE_CHECK_LINK, &UrlParams { url: &joined })
            .await
    }

    /// 创建一次性下载链接
    pub async fn create_one_time_link(
        &self,
        file_id: &str,
        options: &OneTimeLinkOptions,
    ) -> Result<Envelope<OneTimeLinkData>> {
        info!("创建一次性链接: file_id={}", file_id);
        let params = OneTimeLinkCreateParams {
            file_id,
            url: options.url.as_deref(),
            notify: options.notify,
        };
        self.get_authed(API_FILE_ONETIMELINK_CREATE, &params).await
    }

    /// 查询一次性链接，`None` 返回全部
    pub async fn get_one_time_link_info(
        &self,
        link_ids: Option<IdList>,
    ) -> Result<Envelope<OneTimeLinksData>> {
        let joined = link_ids.as_ref().map(IdList::to_param);
        let params = OneTimeLinkInfoParams {
            link_id: joined.as_deref().filter(|s| !s.is_empty()),
        };
        self.get_authed(API_FILE_ONETIMELINK_INFO, &params).await
    }

    /// 获取下载地址（`delay` 秒后生效）
    pub async fn download_file(&self, file_id: &str) -> Result<Envelope<DownloadLink>> {
        info!("获取下载链接: file_id={}", file_id);
        self.get_authed(API_FILE_DOWNLOAD, &FileIdParams { file_id })
            .await
    }

    /// 获取文件信息
    pub async fn get_file(&self, file_id: &str) -> Result<Envelope<FileData>> {
        self.get_authed(API_FILE_INFO, &FileIdParams { file_id })
            .await
    }

    /// 删除文件
    pub async fn remove_file(&self, file_ids: impl Into<IdList>) -> Result<Envelope<BatchData>> {
        let file_ids = file_ids.into();
        info!("删除文件: {} 个", file_ids.len());

        let file_id = file_ids.to_param();
        let envelope = self
            .get_authed(API_FILE_DELETE, &FileIdParams { file_id: &file_id })
            .await?;
        Self::log_batch("删除文件", &envelope);
        Ok(envelope)
    }

    /// 重命名文件
    pub async fn rename_file(&self, file_id: &str, name: &str) -> Result<Envelope<FileData>> {
        if name.is_empty() {
            return Err(Error::EmptyName);
        }
        info!("重命名文件: file_id={}, name={}", file_id, name);
        self.get_authed(API_FILE_RENAME, &FileRenameParams { file_id, name })
            .await
    }

    /// 修改文件可见性
    pub async fn update_file_mode(
        &self,
        file_id: &str,
        mode: FileMode,
    ) -> Result<Envelope<FileData>> {
        info!("修改文件模式: file_id={}, mode={}", file_id, mode.label());
        self.get_authed(API_FILE_CHANGE_MODE, &FileModeParams { file_id, mode })
            .await
    }

    /// 复制文件到目标文件夹
    pub async fn copy_file(
        &self,
        file_ids: impl Into<IdList>,
        folder_id_dest: &str,
    ) -> Result<Envelope<BatchData>> {
        let file_ids = file_ids.into();
        info!("复制文件: {} 个 -> {}", file_ids.len(), folder_id_dest);

        let file_id = file_ids.to_param();
        let params = FileTransferParams {
            file_id: &file_id,
            folder_id_dest,
        };
        let envelope = self.get_authed(API_FILE_COPY, &params).await?;
        Self::log_batch("复制文件", &envelope);
        Ok(envelope)
    }

    /// 按文件 ID 或下载链接复制（可复制他人的文件）
    ///
    /// 以 `http` 开头的输入作为 `url` 发送，否则作为 `file_id`
    pub async fn copy_file_by_id_or_link(
        &self,
        id_or_url: &str,
        folder_id_dest: &str,
    ) -> Result<Envelope<FileData>> {
        let file = FileRef::parse(id_or_url);
        info!("复制文件: {:?} -> {}", file, folder_id_dest);
        self.get_authed(API_FILE_XCOPY, &FileXcopyParams::new(&file, folder_id_dest))
            .await
    }

    /// 按内容 MD5 复制服务器上已存在的文件
    pub async fn copy_file_by_hash(
        &self,
        hash: &str,
        name: &str,
        folder_id_dest: &str,
    ) -> Result<Envelope<FileData>> {
        if name.is_empty() {
            return Err(Error::EmptyName);
        }
        info!("按哈希复制: hash={}, name={} -> {}", hash, name, folder_id_dest);
        let params = HashCopyParams {
            hash,
            name,
            folder_id_dest,
        };
        self.get_authed(API_FILE_HASHCOPY, &params).await
    }

    /// 移动文件到目标文件夹
    pub async fn move_file(
        &self,
        file_ids: impl Into<IdList>,
        folder_id_dest: &str,
    ) -> Result<Envelope<BatchData>> {
        let file_ids = file_ids.into();
        info!("移动文件: {} 个 -> {}", file_ids.len(), folder_id_dest);

        let file_id = file_ids.to_param();
        let params = FileTransferParams {
            file_id: &file_id,
            folder_id_dest,
        };
        let envelope = self.get_authed(API_FILE_MOVE, &params).await?;
        Self::log_batch("移动文件", &envelope);
        Ok(envelope)
    }
}
