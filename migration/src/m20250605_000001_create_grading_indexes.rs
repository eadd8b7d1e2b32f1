use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 用户表索引
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_users_role")
                    .table(Users::Table)
                    .col(Users::Role)
                    .to_owned(),
            )
            .await?;

        // 答卷表索引
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_copies_candidate_id")
                    .table(Copies::Table)
                    .col(Copies::CandidateId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_copies_teacher1_id")
                    .table(Copies::Table)
                    .col(Copies::Teacher1Id)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_copies_teacher2_id")
                    .table(Copies::Table)
                    .col(Copies::Teacher2Id)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_copies_teacher3_id")
                    .table(Copies::Table)
                    .col(Copies::Teacher3Id)
                    .to_owned(),
            )
            .await?;

        // 成绩表索引（候选人排名）
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_results_value")
                    .table(Results::Table)
                    .col(Results::Value)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_results_value")
                    .table(Results::Table)
                    .to_owned(),
            )
            .await?;
        manager
            .drop_index(
                Index::drop()
                    .name("idx_copies_teacher3_id")
                    .table(Copies::Table)
                    .to_owned(),
            )
            .await?;
        manager
            .drop_index(
                Index::drop()
                    .name("idx_copies_teacher2_id")
                    .table(Copies::Table)
                    .to_owned(),
            )
            .await?;
        manager
            .drop_index(
                Index::drop()
                    .name("idx_copies_teacher1_id")
                    .table(Copies::Table)
                    .to_owned(),
            )
            .await?;
        manager
            .drop_index(
                Index::drop()
                    .name("idx_copies_candidate_id")
                    .table(Copies::Table)
                    .to_owned(),
            )
            .await?;
        manager
            .drop_index(
                Index::drop()
                    .name("idx_users_role")
                    .table(Users::Table)
                    .to_owned(),
            )
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum Users {
    #[sea_orm(iden = "users")]
    Table,
    Role,
}

#[derive(DeriveIden)]
enum Copies {
    #[sea_orm(iden = "copies")]
    Table,
    CandidateId,
    #[sea_orm(iden = "teacher1_id")]
    Teacher1Id,
    #[sea_orm(iden = "teacher2_id")]
    Teacher2Id,
    #[sea_orm(iden = "teacher3_id")]
    Teacher3Id,
}

#[derive(DeriveIden)]
enum Results {
    #[sea_orm(iden = "results")]
    Table,
    Value,
}
