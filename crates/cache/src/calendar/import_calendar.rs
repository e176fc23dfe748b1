use crate::{context::CacheContext, error::CacheError, shared::usecase::UseCase};

/// Uploads an ics file. The imported events show up on the next load.
pub struct ImportCalendarUseCase {
    pub file_name: String,
    pub content: Vec<u8>,
}

impl std::fmt::Debug for ImportCalendarUseCase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImportCalendarUseCase")
            .field("file_name", &self.file_name)
            .field("bytes", &self.content.len())
            .finish()
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for ImportCalendarUseCase {
    type Response = ();

    type Errors = CacheError;

    async fn execute(&mut self, ctx: &CacheContext) -> Result<Self::Response, Self::Errors> {
        if self.content.is_empty() {
            return Err(CacheError::Validation("The file is empty".into()));
        }
        let content = std::mem::take(&mut self.content);
        Ok(ctx
            .infra
            .gateway
            .import_calendar(&self.file_name, content)
            .await?)
    }
}
