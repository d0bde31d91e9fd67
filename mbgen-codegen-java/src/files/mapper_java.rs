use std::path::{Path, PathBuf};

use mbgen_codegen::{PathResolver, RenderContext, builder::CodeBuilder};
use mbgen_core::{ArtifactKind, FileRules, GeneratedFile};

/// The data-access interface (`<Accessor>.java`).
pub struct MapperJava<'a> {
    ctx: &'a RenderContext,
}

impl<'a> MapperJava<'a> {
    pub fn new(ctx: &'a RenderContext) -> Self {
        Self { ctx }
    }
}

impl GeneratedFile for MapperJava<'_> {
    fn path(&self, root: &Path) -> PathBuf {
        PathResolver::with_root(root, &self.ctx.options).resolve(ArtifactKind::Accessor, self.ctx)
    }

    fn rules(&self) -> FileRules {
        FileRules::always_overwrite()
    }

    fn render(&self) -> String {
        let ctx = self.ctx;
        let options = &ctx.options;

        let b = CodeBuilder::java();
        let b = header(b, ctx);
        let b = interface_doc(b, ctx);
        b.line(&format!("public interface {} {{", ctx.accessor_name))
            .indent()
            .fragment(&crud_methods(ctx))
            .when(options.generate_paged_query, |b| {
                b.blank().fragment(&paged_query(ctx))
            })
            .when(options.generate_batch_insert, |b| {
                b.blank().fragment(&batch_insert(ctx))
            })
            .when(options.generate_batch_update, |b| {
                b.blank().fragment(&batch_update(ctx))
            })
            .dedent()
            .line("}")
            .build()
    }
}

fn uses_list(ctx: &RenderContext) -> bool {
    let options = &ctx.options;
    options.generate_paged_query || options.generate_batch_insert || options.generate_batch_update
}

fn header(b: CodeBuilder, ctx: &RenderContext) -> CodeBuilder {
    let accessor_package = &ctx.packages.accessor;
    let model_package = &ctx.packages.model;
    let needs_model_import = !model_package.is_empty() && model_package != accessor_package;

    b.when(!accessor_package.is_empty(), |b| {
        b.line(&format!("package {accessor_package};")).blank()
    })
    .when(needs_model_import, |b| {
        b.line(&format!("import {};", ctx.model_type()))
    })
    .when(uses_list(ctx), |b| {
        b.line("import java.util.List;")
            .line("import org.apache.ibatis.annotations.Param;")
    })
    .when(needs_model_import || uses_list(ctx), |b| b.blank())
}

fn interface_doc(b: CodeBuilder, ctx: &RenderContext) -> CodeBuilder {
    b.when(ctx.options.comments, |b| {
        b.javadoc_block([format!("Data access for table {}", ctx.table_name).as_str()])
    })
}

fn method(b: CodeBuilder, ctx: &RenderContext, doc: &str, signature: &str) -> CodeBuilder {
    b.when(ctx.options.comments, |b| b.javadoc(doc))
        .line(signature)
}

/// The six canonical by-key and insert/update methods.
pub(crate) fn crud_methods(ctx: &RenderContext) -> String {
    let model = &ctx.domain_object_name;
    let key = ctx.key();
    let key_param = format!("{} {}", key.output_type, key.identifier_name);

    let methods = [
        (
            "Delete a row by primary key",
            format!("int deleteByPrimaryKey({key_param});"),
        ),
        ("Insert a row", format!("int insert({model} record);")),
        (
            "Insert a row, skipping null fields",
            format!("int insertSelective({model} record);"),
        ),
        (
            "Select a row by primary key",
            format!("{model} selectByPrimaryKey({key_param});"),
        ),
        (
            "Update a row by primary key, skipping null fields",
            format!("int updateByPrimaryKeySelective({model} record);"),
        ),
        (
            "Update a row by primary key",
            format!("int updateByPrimaryKey({model} record);"),
        ),
    ];

    methods
        .iter()
        .enumerate()
        .fold(CodeBuilder::java(), |b, (i, (doc, signature))| {
            method(b.when(i > 0, |b| b.blank()), ctx, doc, signature)
        })
        .build()
}

pub(crate) fn paged_query(ctx: &RenderContext) -> String {
    method(
        CodeBuilder::java(),
        ctx,
        "Select one page of rows",
        &format!(
            "List<{}> selectByPage(@Param(\"offset\") int offset, @Param(\"limit\") int limit);",
            ctx.domain_object_name
        ),
    )
    .build()
}

pub(crate) fn batch_insert(ctx: &RenderContext) -> String {
    method(
        CodeBuilder::java(),
        ctx,
        "Insert several rows in one statement",
        &format!(
            "int insertBatch(@Param(\"list\") List<{}> records);",
            ctx.domain_object_name
        ),
    )
    .build()
}

pub(crate) fn batch_update(ctx: &RenderContext) -> String {
    method(
        CodeBuilder::java(),
        ctx,
        "Update several rows by primary key",
        &format!(
            "int updateBatch(@Param(\"list\") List<{}> records);",
            ctx.domain_object_name
        ),
    )
    .build()
}
