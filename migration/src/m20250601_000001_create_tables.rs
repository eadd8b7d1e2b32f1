use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 创建用户表
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Users::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Users::Username)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(Users::Email)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Users::PasswordHash).string().not_null())
                    .col(ColumnDef::new(Users::Role).string().not_null())
                    .col(ColumnDef::new(Users::Status).string().not_null())
                    .col(ColumnDef::new(Users::DisplayName).string().null())
                    .col(ColumnDef::new(Users::LastLogin).big_integer().null())
                    .col(ColumnDef::new(Users::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(Users::UpdatedAt).big_integer().not_null())
                    .to_owned(),
            )
            .await?;

        // 创建科目表
        manager
            .create_table(
                Table::create()
                    .table(Modules::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Modules::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Modules::Name)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Modules::Description).text().null())
                    .col(ColumnDef::new(Modules::CreatedAt).big_integer().not_null())
                    .to_owned(),
            )
            .await?;

        // 创建匿名码表
        manager
            .create_table(
                Table::create()
                    .table(SecretCodes::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(SecretCodes::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(SecretCodes::Content)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(SecretCodes::CandidateId)
                            .big_integer()
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(SecretCodes::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(SecretCodes::Table, SecretCodes::CandidateId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建答卷表
        manager
            .create_table(
                Table::create()
                    .table(Copies::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Copies::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Copies::CandidateId).big_integer().not_null())
                    .col(ColumnDef::new(Copies::ModuleId).big_integer().not_null())
                    .col(ColumnDef::new(Copies::Teacher1Id).big_integer().null())
                    .col(ColumnDef::new(Copies::Teacher2Id).big_integer().null())
                    .col(ColumnDef::new(Copies::Teacher3Id).big_integer().null())
                    .col(ColumnDef::new(Copies::Mark1).double().null())
                    .col(ColumnDef::new(Copies::Mark2).double().null())
                    .col(ColumnDef::new(Copies::Mark3).double().null())
                    .col(ColumnDef::new(Copies::Mark1GraderId).big_integer().null())
                    .col(
                        ColumnDef::new(Copies::Version)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(Copies::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(Copies::UpdatedAt).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(Copies::Table, Copies::CandidateId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Copies::Table, Copies::ModuleId)
                            .to(Modules::Table, Modules::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Copies::Table, Copies::Teacher1Id)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Copies::Table, Copies::Teacher2Id)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Copies::Table, Copies::Teacher3Id)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建成绩表
        manager
            .create_table(
                Table::create()
                    .table(Results::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Results::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Results::CandidateId)
                            .big_integer()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Results::Value).double().not_null())
                    .col(ColumnDef::new(Results::Accepted).boolean().not_null())
                    .col(ColumnDef::new(Results::CreatedAt).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(Results::Table, Results::CandidateId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 按照创建的相反顺序删除
        manager
            .drop_table(Table::drop().table(Results::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Copies::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(SecretCodes::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Modules::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum Users {
    #[sea_orm(iden = "users")]
    Table,
    Id,
    Username,
    Email,
    PasswordHash,
    Role,
    Status,
    DisplayName,
    LastLogin,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Modules {
    #[sea_orm(iden = "modules")]
    Table,
    Id,
    Name,
    Description,
    CreatedAt,
}

#[derive(DeriveIden)]
enum SecretCodes {
    #[sea_orm(iden = "secret_codes")]
    Table,
    Id,
    Content,
    CandidateId,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Copies {
    #[sea_orm(iden = "copies")]
    Table,
    Id,
    CandidateId,
    ModuleId,
    #[sea_orm(iden = "teacher1_id")]
    Teacher1Id,
    #[sea_orm(iden = "teacher2_id")]
    Teacher2Id,
    #[sea_orm(iden = "teacher3_id")]
    Teacher3Id,
    #[sea_orm(iden = "mark1")]
    Mark1,
    #[sea_orm(iden = "mark2")]
    Mark2,
    #[sea_orm(iden = "mark3")]
    Mark3,
    #[sea_orm(iden = "mark1_grader_id")]
    Mark1GraderId,
    Version,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Results {
    #[sea_orm(iden = "results")]
    Table,
    Id,
    CandidateId,
    Value,
    Accepted,
    CreatedAt,
}
