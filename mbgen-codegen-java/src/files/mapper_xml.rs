use std::path::{Path, PathBuf};

use mbgen_codegen::{KeyRef, PathResolver, RenderContext, RenderField, builder::CodeBuilder};
use mbgen_core::{ArtifactKind, Dialect, FileRules, GeneratedFile};

const XML_DECLARATION: &str = r#"<?xml version="1.0" encoding="UTF-8"?>"#;
const DOCTYPE: &str = r#"<!DOCTYPE mapper PUBLIC "-//mybatis.org//DTD Mapper 3.0//EN" "http://mybatis.org/dtd/mybatis-3-mapper.dtd">"#;

/// The declarative mapping document (`<Accessor>.xml`).
///
/// Kept as-is when it already exists unless `overwrite_mapping_document`
/// is set.
pub struct MapperXml<'a> {
    ctx: &'a RenderContext,
}

impl<'a> MapperXml<'a> {
    pub fn new(ctx: &'a RenderContext) -> Self {
        Self { ctx }
    }
}

impl GeneratedFile for MapperXml<'_> {
    fn path(&self, root: &Path) -> PathBuf {
        PathResolver::with_root(root, &self.ctx.options).resolve(ArtifactKind::Mapping, self.ctx)
    }

    fn rules(&self) -> FileRules {
        if self.ctx.options.overwrite_mapping_document {
            FileRules::always_overwrite()
        } else {
            FileRules::if_missing()
        }
    }

    fn render(&self) -> String {
        let ctx = self.ctx;
        let options = &ctx.options;

        let statements = [
            Some(result_map(ctx)),
            Some(column_list(ctx)),
            Some(select_by_key(ctx)),
            Some(delete_by_key(ctx)),
            Some(insert(ctx)),
            Some(insert_selective(ctx)),
            Some(update_by_key_selective(ctx)),
            Some(update_by_key(ctx)),
            options.generate_paged_query.then(|| select_by_page(ctx)),
            options.generate_batch_insert.then(|| insert_batch(ctx)),
            options.generate_batch_update.then(|| update_batch(ctx)),
        ];

        CodeBuilder::xml()
            .line(XML_DECLARATION)
            .line(DOCTYPE)
            .line(&format!("<mapper namespace=\"{}\">", ctx.accessor_type()))
            .indent()
            .each(statements.iter().flatten().enumerate(), |b, (i, fragment)| {
                b.when(i > 0, |b| b.blank()).fragment(fragment)
            })
            .dedent()
            .line("</mapper>")
            .build()
    }
}

/// `#{name,jdbcType=TAG}`, optionally prefixed with a foreach item.
fn param(item: Option<&str>, name: &str, io_tag: &str) -> String {
    match item {
        Some(item) => format!("#{{{item}.{name},jdbcType={io_tag}}}"),
        None => format!("#{{{name},jdbcType={io_tag}}}"),
    }
}

fn field_param(item: Option<&str>, field: &RenderField) -> String {
    param(item, &field.identifier_name, &field.io_tag)
}

fn key_condition(item: Option<&str>, key: KeyRef<'_>) -> String {
    format!(
        "WHERE {} = {}",
        key.column_name,
        param(item, key.identifier_name, key.io_tag)
    )
}

fn generated_keys_attr(ctx: &RenderContext) -> String {
    match ctx.generated_key_property() {
        Some(property) => format!(" useGeneratedKeys=\"true\" keyProperty=\"{property}\""),
        None => String::new(),
    }
}

/// Column assignments for a plain update.
///
/// A table whose only column is the key assigns the key to itself so the
/// statement stays valid.
fn assignments<'a>(ctx: &'a RenderContext, item: Option<&str>) -> Vec<String> {
    let fields: Vec<&'a RenderField> = ctx.non_key_fields().collect();
    if fields.is_empty() {
        let key = ctx.key();
        return vec![format!(
            "{} = {}",
            key.column_name,
            param(item, key.identifier_name, key.io_tag)
        )];
    }
    fields
        .iter()
        .map(|f| format!("{} = {}", f.column_name, field_param(item, f)))
        .collect()
}

/// `SET a = ...,` followed by aligned continuation lines.
fn set_clause(b: CodeBuilder, assignments: &[String]) -> CodeBuilder {
    let last = assignments.len().saturating_sub(1);
    b.each(assignments.iter().enumerate(), |b, (i, assignment)| {
        let lead = if i == 0 { "SET " } else { "    " };
        let end = if i == last { "" } else { "," };
        b.line(&format!("{lead}{assignment}{end}"))
    })
}

pub(crate) fn result_map(ctx: &RenderContext) -> String {
    CodeBuilder::xml()
        .block_with_close(
            &format!("<resultMap id=\"BaseResultMap\" type=\"{}\">", ctx.model_type()),
            "</resultMap>",
            |b| {
                b.each(ctx.primary_key(), |b, key| {
                    b.line(&format!(
                        "<id column=\"{}\" jdbcType=\"{}\" property=\"{}\" />",
                        key.column_name, key.io_tag, key.identifier_name
                    ))
                })
                .each(ctx.non_key_fields(), |b, f| {
                    b.line(&format!(
                        "<result column=\"{}\" jdbcType=\"{}\" property=\"{}\" />",
                        f.column_name, f.io_tag, f.identifier_name
                    ))
                })
            },
        )
        .build()
}

pub(crate) fn column_list(ctx: &RenderContext) -> String {
    let columns = ctx
        .fields
        .iter()
        .map(|f| f.column_name.as_str())
        .collect::<Vec<_>>()
        .join(", ");
    CodeBuilder::xml()
        .block_with_close("<sql id=\"Base_Column_List\">", "</sql>", |b| {
            b.line(&columns)
        })
        .build()
}

pub(crate) fn select_by_key(ctx: &RenderContext) -> String {
    let key = ctx.key();
    CodeBuilder::xml()
        .block_with_close(
            &format!(
                "<select id=\"selectByPrimaryKey\" parameterType=\"{}\" resultMap=\"BaseResultMap\">",
                key.qualified_type
            ),
            "</select>",
            |b| {
                b.line("SELECT")
                    .line("<include refid=\"Base_Column_List\" />")
                    .line(&format!("FROM {}", ctx.table_name))
                    .line(&key_condition(None, key))
            },
        )
        .build()
}

pub(crate) fn delete_by_key(ctx: &RenderContext) -> String {
    let key = ctx.key();
    CodeBuilder::xml()
        .block_with_close(
            &format!(
                "<delete id=\"deleteByPrimaryKey\" parameterType=\"{}\">",
                key.qualified_type
            ),
            "</delete>",
            |b| {
                b.line(&format!("DELETE FROM {}", ctx.table_name))
                    .line(&key_condition(None, key))
            },
        )
        .build()
}

pub(crate) fn insert(ctx: &RenderContext) -> String {
    let fields: Vec<&RenderField> = ctx.insert_fields().collect();
    let columns = fields
        .iter()
        .map(|f| f.column_name.as_str())
        .collect::<Vec<_>>()
        .join(", ");
    let values = fields
        .iter()
        .map(|f| field_param(None, f))
        .collect::<Vec<_>>()
        .join(", ");

    CodeBuilder::xml()
        .block_with_close(
            &format!(
                "<insert id=\"insert\" parameterType=\"{}\"{}>",
                ctx.model_type(),
                generated_keys_attr(ctx)
            ),
            "</insert>",
            |b| {
                b.line(&format!("INSERT INTO {} ({columns})", ctx.table_name))
                    .line(&format!("VALUES ({values})"))
            },
        )
        .build()
}

/// `<if test="field != null">` wrapping one line.
fn null_guard(b: CodeBuilder, field: &RenderField, body: &str) -> CodeBuilder {
    b.block_with_close(
        &format!("<if test=\"{} != null\">", field.identifier_name),
        "</if>",
        |b| b.line(body),
    )
}

pub(crate) fn insert_selective(ctx: &RenderContext) -> String {
    let fields: Vec<&RenderField> = ctx.insert_fields().collect();

    CodeBuilder::xml()
        .block_with_close(
            &format!(
                "<insert id=\"insertSelective\" parameterType=\"{}\"{}>",
                ctx.model_type(),
                generated_keys_attr(ctx)
            ),
            "</insert>",
            |b| {
                b.line(&format!("INSERT INTO {}", ctx.table_name))
                    .block_with_close(
                        "<trim prefix=\"(\" suffix=\")\" suffixOverrides=\",\">",
                        "</trim>",
                        |b| {
                            b.each(&fields, |b, f| {
                                null_guard(b, f, &format!("{},", f.column_name))
                            })
                        },
                    )
                    .block_with_close(
                        "<trim prefix=\"VALUES (\" suffix=\")\" suffixOverrides=\",\">",
                        "</trim>",
                        |b| {
                            b.each(&fields, |b, f| {
                                null_guard(b, f, &format!("{},", field_param(None, f)))
                            })
                        },
                    )
            },
        )
        .build()
}

pub(crate) fn update_by_key_selective(ctx: &RenderContext) -> String {
    CodeBuilder::xml()
        .block_with_close(
            &format!(
                "<update id=\"updateByPrimaryKeySelective\" parameterType=\"{}\">",
                ctx.model_type()
            ),
            "</update>",
            |b| {
                b.line(&format!("UPDATE {}", ctx.table_name))
                    .block_with_close("<set>", "</set>", |b| {
                        b.each(ctx.non_key_fields(), |b, f| {
                            null_guard(
                                b,
                                f,
                                &format!("{} = {},", f.column_name, field_param(None, f)),
                            )
                        })
                    })
                    .line(&key_condition(None, ctx.key()))
            },
        )
        .build()
}

pub(crate) fn update_by_key(ctx: &RenderContext) -> String {
    CodeBuilder::xml()
        .block_with_close(
            &format!(
                "<update id=\"updateByPrimaryKey\" parameterType=\"{}\">",
                ctx.model_type()
            ),
            "</update>",
            |b| {
                let b = b.line(&format!("UPDATE {}", ctx.table_name));
                set_clause(b, &assignments(ctx, None)).line(&key_condition(None, ctx.key()))
            },
        )
        .build()
}

/// Paging clause in the dialect's syntax.
pub(crate) fn paging_clause(dialect: Dialect) -> &'static str {
    match dialect {
        Dialect::MySql => "LIMIT #{offset}, #{limit}",
        Dialect::PostgreSql => "LIMIT #{limit} OFFSET #{offset}",
        Dialect::Oracle => "OFFSET #{offset} ROWS FETCH NEXT #{limit} ROWS ONLY",
    }
}

pub(crate) fn select_by_page(ctx: &RenderContext) -> String {
    CodeBuilder::xml()
        .block_with_close(
            "<select id=\"selectByPage\" resultMap=\"BaseResultMap\">",
            "</select>",
            |b| {
                b.line("SELECT")
                    .line("<include refid=\"Base_Column_List\" />")
                    .line(&format!("FROM {}", ctx.table_name))
                    .line(paging_clause(ctx.dialect()))
            },
        )
        .build()
}

pub(crate) fn insert_batch(ctx: &RenderContext) -> String {
    let fields: Vec<&RenderField> = ctx.insert_fields().collect();
    let columns = fields
        .iter()
        .map(|f| f.column_name.as_str())
        .collect::<Vec<_>>()
        .join(", ");
    let values = fields
        .iter()
        .map(|f| field_param(Some("item"), f))
        .collect::<Vec<_>>()
        .join(", ");

    CodeBuilder::xml()
        .block_with_close(
            &format!(
                "<insert id=\"insertBatch\" parameterType=\"java.util.List\"{}>",
                generated_keys_attr(ctx)
            ),
            "</insert>",
            |b| {
                b.line(&format!("INSERT INTO {} ({columns})", ctx.table_name))
                    .line("VALUES")
                    .block_with_close(
                        "<foreach collection=\"list\" item=\"item\" separator=\",\">",
                        "</foreach>",
                        |b| b.line(&format!("({values})")),
                    )
            },
        )
        .build()
}

pub(crate) fn update_batch(ctx: &RenderContext) -> String {
    CodeBuilder::xml()
        .block_with_close(
            "<update id=\"updateBatch\" parameterType=\"java.util.List\">",
            "</update>",
            |b| {
                b.block_with_close(
                    "<foreach collection=\"list\" item=\"item\" separator=\";\">",
                    "</foreach>",
                    |b| {
                        let b = b.line(&format!("UPDATE {}", ctx.table_name));
                        set_clause(b, &assignments(ctx, Some("item")))
                            .line(&key_condition(Some("item"), ctx.key()))
                    },
                )
            },
        )
        .build()
}

#[cfg(test)]
mod tests {
    use mbgen_codegen::JavaTypeMapper;
    use mbgen_manifest::{Column, GenerationOptions, TableSchema};

    use super::*;

    fn ctx(options: GenerationOptions) -> RenderContext {
        let table = TableSchema::new(
            "user_profile",
            vec![
                Column::new("id", "int").primary_key(),
                Column::new("user_name", "varchar(50)"),
                Column::new("created_at", "datetime"),
            ],
        );
        RenderContext::build(&table, &options, &JavaTypeMapper)
    }

    #[test]
    fn test_result_map_lists_key_first() {
        let table = TableSchema::new(
            "t",
            vec![
                Column::new("name", "varchar"),
                Column::new("id", "bigint").primary_key(),
            ],
        );
        let ctx = RenderContext::build(&table, &GenerationOptions::default(), &JavaTypeMapper);
        insta::assert_snapshot!(result_map(&ctx), @r#"
        <resultMap id="BaseResultMap" type="com.example.model.T">
            <id column="id" jdbcType="BIGINT" property="id" />
            <result column="name" jdbcType="VARCHAR" property="name" />
        </resultMap>
        "#);
    }

    #[test]
    fn test_update_by_key() {
        insta::assert_snapshot!(update_by_key(&ctx(GenerationOptions::default())), @r#"
        <update id="updateByPrimaryKey" parameterType="com.example.model.UserProfile">
            UPDATE user_profile
            SET user_name = #{userName,jdbcType=VARCHAR},
                created_at = #{createdAt,jdbcType=TIMESTAMP}
            WHERE id = #{id,jdbcType=INTEGER}
        </update>
        "#);
    }

    #[test]
    fn test_insert_includes_key_without_generation() {
        let out = insert(&ctx(GenerationOptions::default()));
        assert!(out.contains("INSERT INTO user_profile (id, user_name, created_at)"));
        assert!(out.contains(
            "VALUES (#{id,jdbcType=INTEGER}, #{userName,jdbcType=VARCHAR}, #{createdAt,jdbcType=TIMESTAMP})"
        ));
        assert!(!out.contains("useGeneratedKeys"));
    }

    #[test]
    fn test_insert_with_generated_keys() {
        let out = insert(&ctx(GenerationOptions {
            primary_key_auto_generation: Some("id".into()),
            ..Default::default()
        }));
        assert!(out.contains("useGeneratedKeys=\"true\" keyProperty=\"id\""));
        assert!(out.contains("INSERT INTO user_profile (user_name, created_at)"));
    }

    #[test]
    fn test_selective_statements_guard_fields() {
        let ctx = ctx(GenerationOptions::default());
        let insert = insert_selective(&ctx);
        assert!(insert.contains(
            "<if test=\"userName != null\">\n            user_name,\n        </if>"
        ));
        let update = update_by_key_selective(&ctx);
        assert!(update.contains(
            "<if test=\"createdAt != null\">\n            created_at = #{createdAt,jdbcType=TIMESTAMP},\n        </if>"
        ));
        assert!(!update.contains("<if test=\"id != null\">"));
    }

    #[test]
    fn test_fallback_key_statements() {
        let table = TableSchema::new("audit_log", vec![Column::new("message", "text")]);
        let ctx = RenderContext::build(&table, &GenerationOptions::default(), &JavaTypeMapper);

        assert!(delete_by_key(&ctx).contains("parameterType=\"java.lang.Long\""));
        assert!(select_by_key(&ctx).contains("WHERE id = #{id,jdbcType=BIGINT}"));
        assert!(!result_map(&ctx).contains("<id "));
        assert!(update_by_key(&ctx).contains("SET message = #{message,jdbcType=LONGVARCHAR}"));
    }

    #[test]
    fn test_key_only_table_update_stays_valid() {
        let table = TableSchema::new("seq", vec![Column::new("id", "bigint").primary_key()]);
        let ctx = RenderContext::build(&table, &GenerationOptions::default(), &JavaTypeMapper);
        assert!(update_by_key(&ctx).contains("SET id = #{id,jdbcType=BIGINT}"));
    }

    #[test]
    fn test_paging_per_dialect() {
        assert_eq!(paging_clause(Dialect::MySql), "LIMIT #{offset}, #{limit}");
        assert_eq!(
            paging_clause(Dialect::PostgreSql),
            "LIMIT #{limit} OFFSET #{offset}"
        );
        let ctx = ctx(GenerationOptions {
            dialect: Dialect::Oracle,
            ..Default::default()
        });
        assert!(select_by_page(&ctx).contains("OFFSET #{offset} ROWS FETCH NEXT #{limit} ROWS ONLY"));
    }

    #[test]
    fn test_batch_statements() {
        let ctx = ctx(GenerationOptions::default());
        let insert = insert_batch(&ctx);
        assert!(insert.contains("<foreach collection=\"list\" item=\"item\" separator=\",\">"));
        assert!(insert.contains("(#{item.id,jdbcType=INTEGER}, #{item.userName,jdbcType=VARCHAR}"));

        let update = update_batch(&ctx);
        assert!(update.contains("separator=\";\""));
        assert!(update.contains("WHERE id = #{item.id,jdbcType=INTEGER}"));
    }

    #[test]
    fn test_optional_statements_are_gated() {
        let plain = MapperXml::new(&ctx(GenerationOptions::default())).render();
        assert!(!plain.contains("selectByPage"));
        assert!(!plain.contains("insertBatch"));
        assert!(!plain.contains("updateBatch"));

        let full = MapperXml::new(&ctx(GenerationOptions {
            generate_paged_query: true,
            generate_batch_insert: true,
            generate_batch_update: true,
            ..Default::default()
        }))
        .render();
        assert!(full.contains("<select id=\"selectByPage\""));
        assert!(full.contains("<insert id=\"insertBatch\""));
        assert!(full.contains("<update id=\"updateBatch\""));
        assert!(full.ends_with("</mapper>\n"));
    }

    #[test]
    fn test_overwrite_rules() {
        use mbgen_core::Overwrite;

        let keep = ctx(GenerationOptions::default());
        assert_eq!(MapperXml::new(&keep).rules().overwrite, Overwrite::IfMissing);

        let replace = ctx(GenerationOptions {
            overwrite_mapping_document: true,
            ..Default::default()
        });
        assert_eq!(MapperXml::new(&replace).rules().overwrite, Overwrite::Always);
    }
}
