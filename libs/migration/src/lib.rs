pub use sea_orm_migration::prelude::*;

mod m20260301_000001_create_pricing;
mod m20260301_000002_create_rfps;
mod m20260301_000003_create_files;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260301_000001_create_pricing::Migration),
            Box::new(m20260301_000002_create_rfps::Migration),
            Box::new(m20260301_000003_create_files::Migration),
        ]
    }
}
