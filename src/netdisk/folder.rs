// 文件夹操作

use super::client::*;
use super::params::{
    FolderContentOptions, FolderCreateParams, FolderIdParams, FolderModeParams,
    FolderRenameParams, FolderTransferParams, IdList, OptionalFolderIdParams,
};
use super::{BatchData, Envelope, FileMode, FolderContentData, FolderData};
use crate::error::{Error, Result};
use tracing::{debug, info};

impl RapidgatorClient {
    /// 获取文件夹信息及其子文件夹，`None` 为根目录
    pub async fn get_folder(&self, folder_id: Option<&str>) -> Result<Envelope<FolderData>> {
        debug!("获取文件夹: {}", folder_id.unwrap_or("<root>"));
        self.get_authed(API_FOLDER_INFO, &OptionalFolderIdParams { folder_id })
            .await
    }

    /// 分页获取文件夹内容（子文件夹 + 文件）
    pub async fn get_folder_content(
        &self,
        options: &FolderContentOptions,
    ) -> Result<Envelope<FolderContentData>> {
        debug!("获取文件夹内容: {:?}", options);
        self.get_authed(API_FOLDER_CONTENT, options).await
    }

    /// 创建文件夹，`parent` 为 `None` 时创建在根目录
    pub async fn create_folder(
        &self,
        name: &str,
        parent: Option<&str>,
    ) -> Result<Envelope<FolderData>> {
        if name.is_empty() {
            return Err(Error::EmptyName);
        }
        info!("创建文件夹: name={}, parent={:?}", name, parent);
        let params = FolderCreateParams {
            name,
            folder_id: parent,
        };
        self.get_authed(API_FOLDER_CREATE, &params).await
    }

    /// 删除文件夹
    pub async fn remove_folder(
        &self,
        folder_ids: impl Into<IdList>,
    ) -> Result<Envelope<BatchData>> {
        let folder_ids = folder_ids.into();
        info!("删除文件夹: {} 个", folder_ids.len());

        let folder_id = folder_ids.to_param();
        let envelope = self
            .get_authed(API_FOLDER_DELETE, &FolderIdParams { folder_id: &folder_id })
            .await?;
        Self::log_batch("删除文件夹", &envelope);
        Ok(envelope)
    }

    /// 重命名文件夹
    pub async fn rename_folder(&self, folder_id: &str, name: &str) -> Result<Envelope<FolderData>> {
        if name.is_empty() {
            return Err(Error::EmptyName);
        }
        info!("重命名文件夹: folder_id={}, name={}", folder_id, name);
        self.get_authed(API_FOLDER_RENAME, &FolderRenameParams { folder_id, name })
            .await
    }

    /// 复制文件夹
    pub async fn copy_folder(
        &self,
        folder_ids: impl Into<IdList>,
        folder_id_dest: &str,
    ) -> Result<Envelope<BatchData>> {
        self.transfer_folders(API_FOLDER_COPY, "复制文件夹", folder_ids.into(), folder_id_dest)
            .await
    }

    /// 移动文件夹
    pub async fn move_folder(
        &self,
        folder_ids: impl Into<IdList>,
        folder_id_dest: &str,
    ) -> Result<Envelope<BatchData>> {
        self.transfer_folders(API_FOLDER_MOVE, "移动文件夹", folder_ids.into(), folder_id_dest)
            .await
    }

    /// 修改文件夹可见性
    pub async fn update_folder_mode(
        &self,
        folder_id: &str,
        mode: FileMode,
    ) -> Result<Envelope<FolderData>> {
        info!("修改文件夹模式: folder_id={}, mode={}", folder_id, mode.label());
        self.get_authed(API_FOLDER_CHANGE_MODE, &FolderModeParams { folder_id, mode })
            .await
    }

    async fn transfer_folders(
        &self,
        path: &str,
        operation: &str,
        folder_ids: IdList,
        folder_id_dest: &str,
    ) -> Result<Envelope<BatchData>> {
        info!("{}: {} 个 -> {}", operation, folder_ids.len(), folder_id_dest);

        let folder_id = folder_ids.to_param();
        let params = FolderTransferParams {
            folder_id: &folder_id,
            folder_id_dest,
        };
        let envelope = self.get_authed(path, &params).await?;
        Self::log_batch(operation, &envelope);
        Ok(envelope)
    }
}
