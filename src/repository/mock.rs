//! Mock repository implementations for isolating services in tests.

use mockall::mock;

use crate::domain::print_template::PrintTemplate;
use crate::repository::PrintTemplateReader;
use crate::repository::errors::RepositoryResult;

mock! {
    pub Repository {}

    impl PrintTemplateReader for Repository {
        fn get_print_template(&self, id: &str) -> RepositoryResult<Option<PrintTemplate>>;
        fn list_print_templates(&self) -> RepositoryResult<Vec<PrintTemplate>>;
    }
}
