use std::path::{Path, PathBuf};

use mbgen_codegen::{ImportSet, PathResolver, RenderContext, RenderField, builder::CodeBuilder};
use mbgen_core::{ArtifactKind, FileRules, GeneratedFile, first_upper};

const SERIALIZABLE: &str = "java.io.Serializable";
const OBJECTS: &str = "java.util.Objects";
const JSON_PROPERTY: &str = "com.fasterxml.jackson.annotation.JsonProperty";
const LOMBOK_DATA: &str = "lombok.Data";
const LOMBOK_NO_ARGS: &str = "lombok.NoArgsConstructor";
const LOMBOK_ALL_ARGS: &str = "lombok.AllArgsConstructor";

/// The data-model class (`<Domain>.java`).
pub struct ModelJava<'a> {
    ctx: &'a RenderContext,
}

impl<'a> ModelJava<'a> {
    pub fn new(ctx: &'a RenderContext) -> Self {
        Self { ctx }
    }
}

impl GeneratedFile for ModelJava<'_> {
    fn path(&self, root: &Path) -> PathBuf {
        PathResolver::with_root(root, &self.ctx.options).resolve(ArtifactKind::Model, self.ctx)
    }

    fn rules(&self) -> FileRules {
        FileRules::always_overwrite()
    }

    fn render(&self) -> String {
        let ctx = self.ctx;
        let options = &ctx.options;
        let lombok = options.use_lombok;

        let b = CodeBuilder::java();
        let b = package(b, ctx);
        let b = imports(b, ctx);
        let b = class_doc(b, ctx);
        let b = b.when(lombok, |b| lombok_annotations(b, ctx));
        b.line(&format!(
            "public class {} implements Serializable {{",
            ctx.domain_object_name
        ))
        .indent()
        .line("private static final long serialVersionUID = 1L;")
        .each(&ctx.fields, |b, field| field_declaration(b.blank(), ctx, field))
        .when(options.use_constructors && !lombok, |b| {
            constructors(b.blank(), ctx)
        })
        .when(!lombok, |b| accessors(b, ctx))
        .when(options.use_rich_object_methods && !lombok, |b| {
            object_methods(b.blank(), ctx)
        })
        .dedent()
        .line("}")
        .build()
    }
}

/// Imports needed by the model class, including option-driven ones.
pub(crate) fn import_set(ctx: &RenderContext) -> ImportSet {
    let options = &ctx.options;
    let mut imports = ctx.imports.clone();
    imports.add(SERIALIZABLE);
    if options.use_property_annotations {
        imports.add(JSON_PROPERTY);
    }
    if options.use_lombok {
        imports.add(LOMBOK_DATA);
        if options.use_constructors {
            imports.add(LOMBOK_NO_ARGS);
            imports.add(LOMBOK_ALL_ARGS);
        }
    } else if options.use_rich_object_methods {
        imports.add(OBJECTS);
    }
    imports
}

fn package(b: CodeBuilder, ctx: &RenderContext) -> CodeBuilder {
    let package = &ctx.packages.model;
    b.when(!package.is_empty(), |b| {
        b.line(&format!("package {package};")).blank()
    })
}

fn imports(b: CodeBuilder, ctx: &RenderContext) -> CodeBuilder {
    b.each(import_set(ctx).iter(), |b, import| {
        b.line(&format!("import {import};"))
    })
    .blank()
}

fn class_doc(b: CodeBuilder, ctx: &RenderContext) -> CodeBuilder {
    match ctx.table_comment.as_deref() {
        Some(comment) if ctx.options.comments => b.javadoc_block(comment.lines()),
        _ => b,
    }
}

fn lombok_annotations(b: CodeBuilder, ctx: &RenderContext) -> CodeBuilder {
    b.line("@Data").when(ctx.options.use_constructors, |b| {
        b.line("@NoArgsConstructor").line("@AllArgsConstructor")
    })
}

/// Value of the serialization-name annotation for a field.
pub(crate) fn property_annotation_name(ctx: &RenderContext, field: &RenderField) -> String {
    if ctx.options.property_annotation_upper_case {
        first_upper(&field.column_name)
    } else {
        field.column_name.clone()
    }
}

fn field_declaration(b: CodeBuilder, ctx: &RenderContext, field: &RenderField) -> CodeBuilder {
    let options = &ctx.options;
    b.when(options.comments && !field.comment.is_empty(), |b| {
        b.javadoc(&field.comment)
    })
    .when(options.use_property_annotations, |b| {
        b.line(&format!(
            "@JsonProperty(\"{}\")",
            property_annotation_name(ctx, field)
        ))
    })
    .line(&format!(
        "private {} {};",
        field.output_type, field.identifier_name
    ))
}

fn constructors(b: CodeBuilder, ctx: &RenderContext) -> CodeBuilder {
    let name = &ctx.domain_object_name;
    let params = ctx
        .fields
        .iter()
        .map(|f| format!("{} {}", f.output_type, f.identifier_name))
        .collect::<Vec<_>>()
        .join(", ");

    b.line(&format!("public {name}() {{}}"))
        .when(!ctx.fields.is_empty(), |b| {
            b.blank().block_with_close(
                &format!("public {name}({params}) {{"),
                "}",
                |b| {
                    b.each(&ctx.fields, |b, f| {
                        b.line(&format!(
                            "this.{0} = {0};",
                            f.identifier_name
                        ))
                    })
                },
            )
        })
}

fn accessors(b: CodeBuilder, ctx: &RenderContext) -> CodeBuilder {
    b.each(&ctx.fields, |b, f| {
        let suffix = first_upper(&f.identifier_name);
        b.blank()
            .block_with_close(
                &format!("public {} get{suffix}() {{", f.output_type),
                "}",
                |b| b.line(&format!("return {};", f.identifier_name)),
            )
            .blank()
            .block_with_close(
                &format!(
                    "public void set{suffix}({} {}) {{",
                    f.output_type, f.identifier_name
                ),
                "}",
                |b| b.line(&format!("this.{0} = {0};", f.identifier_name)),
            )
    })
}

fn object_methods(b: CodeBuilder, ctx: &RenderContext) -> CodeBuilder {
    let name = &ctx.domain_object_name;
    let names: Vec<&str> = ctx.fields.iter().map(|f| f.identifier_name.as_str()).collect();

    let comparisons: Vec<String> = names
        .iter()
        .map(|n| format!("Objects.equals({n}, that.{n})"))
        .collect();

    let described = names
        .iter()
        .enumerate()
        .map(|(i, n)| {
            let sep = if i == 0 { "" } else { ", " };
            format!("\"{sep}{n}=\" + {n} +")
        })
        .collect::<Vec<_>>();

    b.line("@Override")
        .block_with_close("public boolean equals(Object o) {", "}", |b| {
            b.block_with_close("if (this == o) {", "}", |b| b.line("return true;"))
                .block_with_close(
                    "if (o == null || getClass() != o.getClass()) {",
                    "}",
                    |b| b.line("return false;"),
                )
                .line(&format!("{name} that = ({name}) o;"))
                .fragment(&equality_return(&comparisons))
        })
        .blank()
        .line("@Override")
        .block_with_close("public int hashCode() {", "}", |b| {
            b.line(&format!("return Objects.hash({});", names.join(", ")))
        })
        .blank()
        .line("@Override")
        .block_with_close("public String toString() {", "}", |b| {
            b.line(&format!("return \"{name}{{\" +"))
                .indent()
                .each(&described, |b, part| b.line(part))
                .line("\"}\";")
                .dedent()
        })
}

/// `return a && b && c;` with one comparison per line.
fn equality_return(comparisons: &[String]) -> String {
    match comparisons {
        [] => "return true;".to_string(),
        [first, rest @ ..] => CodeBuilder::java()
            .line(&format!("return {first}{}", if rest.is_empty() { ";" } else { "" }))
            .indent()
            .indent()
            .each(rest.iter().enumerate(), |b, (i, c)| {
                let end = if i + 1 == rest.len() { ";" } else { "" };
                b.line(&format!("&& {c}{end}"))
            })
            .build(),
    }
}

#[cfg(test)]
mod tests {
    use mbgen_codegen::JavaTypeMapper;
    use mbgen_manifest::{Column, GenerationOptions, TableSchema};

    use super::*;

    fn ctx(options: GenerationOptions) -> RenderContext {
        let table = TableSchema::new(
            "user",
            vec![
                Column::new("id", "bigint").primary_key().comment("key"),
                Column::new("name", "varchar(20)"),
            ],
        )
        .with_comment("application user");
        RenderContext::build(&table, &options, &JavaTypeMapper)
    }

    #[test]
    fn test_standard_with_methods() {
        let out = ModelJava::new(&ctx(GenerationOptions {
            use_constructors: true,
            use_rich_object_methods: true,
            ..Default::default()
        }))
        .render();

        assert!(out.contains("public User() {}"));
        assert!(out.contains("public User(Long id, String name) {"));
        assert!(out.contains("        this.id = id;"));
        assert!(out.contains("public boolean equals(Object o) {"));
        assert!(out.contains("public int hashCode() {"));
        assert!(out.contains("public String toString() {"));
        assert!(out.contains("Objects.equals(id, that.id)"));
        assert!(out.contains("return Objects.hash(id, name);"));
        assert!(out.contains("import java.util.Objects;"));
    }

    #[test]
    fn test_standard_without_methods() {
        let out = ModelJava::new(&ctx(GenerationOptions::default())).render();

        assert!(!out.contains("public User() {}"));
        assert!(!out.contains("equals(Object o)"));
        assert!(!out.contains("java.util.Objects"));
        assert!(out.contains("public Long getId() {"));
        assert!(out.contains("public void setName(String name) {"));
    }

    #[test]
    fn test_lombok() {
        let out = ModelJava::new(&ctx(GenerationOptions {
            use_lombok: true,
            use_constructors: true,
            use_rich_object_methods: true,
            ..Default::default()
        }))
        .render();

        assert!(out.contains("import lombok.Data;"));
        assert!(out.contains("@Data\n@NoArgsConstructor\n@AllArgsConstructor\npublic class User"));
        assert!(!out.contains("getId"));
        assert!(!out.contains("equals(Object o)"));
        assert!(!out.contains("public User() {}"));
    }

    #[test]
    fn test_comments_toggle() {
        let with = ModelJava::new(&ctx(GenerationOptions::default())).render();
        assert!(with.contains("/**\n * application user\n */\npublic class User"));
        assert!(with.contains("    /** key */\n    private Long id;"));

        let without = ModelJava::new(&ctx(GenerationOptions {
            comments: false,
            ..Default::default()
        }))
        .render();
        assert!(!without.contains("application user"));
        assert!(!without.contains("/** key */"));
    }

    #[test]
    fn test_property_annotations() {
        let out = ModelJava::new(&ctx(GenerationOptions {
            use_property_annotations: true,
            ..Default::default()
        }))
        .render();
        assert!(out.contains("import com.fasterxml.jackson.annotation.JsonProperty;"));
        assert!(out.contains("    @JsonProperty(\"name\")\n    private String name;"));

        let upper = ModelJava::new(&ctx(GenerationOptions {
            use_property_annotations: true,
            property_annotation_upper_case: true,
            ..Default::default()
        }))
        .render();
        assert!(upper.contains("@JsonProperty(\"Name\")"));
        assert!(upper.contains("@JsonProperty(\"Id\")"));
    }

    #[test]
    fn test_property_annotation_upper_case_keeps_rest_of_name() {
        let table = TableSchema::new(
            "user",
            vec![
                Column::new("id", "bigint").primary_key(),
                Column::new("user_name", "varchar(20)"),
                Column::new("userAge", "int"),
            ],
        );
        let options = GenerationOptions {
            use_property_annotations: true,
            property_annotation_upper_case: true,
            ..Default::default()
        };
        let out = ModelJava::new(&RenderContext::build(&table, &options, &JavaTypeMapper)).render();

        assert!(out.contains("    @JsonProperty(\"User_name\")\n    private String userName;"));
        assert!(out.contains("    @JsonProperty(\"UserAge\")\n    private Integer userAge;"));
        assert!(!out.contains("USER_NAME"));
    }

    #[test]
    fn test_comment_terminator_is_escaped() {
        let table = TableSchema::new(
            "user",
            vec![
                Column::new("id", "bigint")
                    .primary_key()
                    .comment("ends here */ oops"),
            ],
        )
        .with_comment("table */ comment");
        let out = ModelJava::new(&RenderContext::build(
            &table,
            &GenerationOptions::default(),
            &JavaTypeMapper,
        ))
        .render();

        assert!(out.contains(" * table *&#47; comment"));
        assert!(out.contains("    /** ends here *&#47; oops */"));
        assert_eq!(out.matches("*/").count(), 2);
    }

    #[test]
    fn test_equality_return() {
        assert_eq!(equality_return(&[]), "return true;");
        assert_eq!(
            equality_return(&["a".to_string(), "b".to_string()]),
            "return a\n        && b;\n"
        );
    }

    #[test]
    fn test_header_fragment() {
        let out = ModelJava::new(&ctx(GenerationOptions::default())).render();
        insta::assert_snapshot!(out.lines().take(6).collect::<Vec<_>>().join("\n"), @r"
        package com.example.model;

        import java.io.Serializable;

        /**
         * application user
        ");
    }
}
