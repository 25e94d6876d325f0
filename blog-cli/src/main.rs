use std::process;

use anyhow::{Context, Result};
use blog_client::{BlogClient, BlogClientError, ListParams, Post, PostInput, PostPage};
use clap::{Parser, Subcommand};

const DEFAULT_HTTP_SERVER: &str = "http://127.0.0.1:8080";

#[derive(Debug, Parser)]
#[command(name = "blog-cli", version, about = "CLI клиент для blog-server")]
struct Cli {
    /// Адрес сервера.
    #[arg(long, global = true, env = "BLOG_SERVER")]
    server: Option<String>,

    /// Печатать ответ в JSON вместо текстового вида.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Список постов, от новых к старым.
    List {
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        page: Option<u32>,
        #[arg(long)]
        limit: Option<u32>,
    },
    /// Получение поста по id.
    Get {
        #[arg(long)]
        id: String,
    },
    /// Создание поста.
    Create {
        #[arg(long)]
        title: String,
        #[arg(long)]
        content: String,
        #[arg(long)]
        category: String,
        #[arg(long)]
        image_url: Option<String>,
        /// Содержимое в формате markdown.
        #[arg(long)]
        markdown: bool,
    },
    /// Обновление поста.
    ///
    /// Неуказанные поля берутся из текущей версии поста.
    Update {
        #[arg(long)]
        id: String,
        #[arg(long)]
        title: String,
        #[arg(long)]
        content: Option<String>,
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        image_url: Option<String>,
        #[arg(long)]
        markdown: Option<bool>,
    },
    /// Удаление поста.
    Delete {
        #[arg(long)]
        id: String,
    },
    /// Удаление всех постов (только development).
    Reset,
    /// Проверка доступности сервера.
    Health,
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("Ошибка: {err}");
        process::exit(1);
    }
}

async fn run() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let server = resolve_server(cli.server);
    let client = BlogClient::new(server).context("не удалось создать HTTP-клиент")?;
    let json = cli.json;

    match cli.command {
        Command::List {
            category,
            page,
            limit,
        } => {
            let params = ListParams {
                category,
                page,
                limit,
            };
            let list = client
                .list_posts(&params)
                .await
                .map_err(map_client_error)?;
            if json {
                print_json(&serde_json::json!({
                    "data": list.posts,
                    "pagination": list.pagination,
                }))?;
            } else {
                print_list(&list);
            }
        }
        Command::Get { id } => {
            let post = client.get_post(&id).await.map_err(map_client_error)?;
            output_post(json, "Пост", &post)?;
        }
        Command::Create {
            title,
            content,
            category,
            image_url,
            markdown,
        } => {
            let input = PostInput {
                title,
                content,
                image_url,
                category,
                is_markdown: markdown,
            };
            let post = client
                .create_post(&input)
                .await
                .map_err(map_client_error)?;
            output_post(json, "Пост создан", &post)?;
        }
        Command::Update {
            id,
            title,
            content,
            category,
            image_url,
            markdown,
        } => {
            // Обновление полное, поэтому недостающие поля берём из текущей версии.
            let current = client.get_post(&id).await.map_err(map_client_error)?;
            let input = merge_update(
                &current,
                UpdateArgs {
                    title,
                    content,
                    category,
                    image_url,
                    markdown,
                },
            );

            let post = client
                .update_post(&id, &input)
                .await
                .map_err(map_client_error)?;
            output_post(json, "Пост обновлён", &post)?;
        }
        Command::Delete { id } => {
            let message = client.delete_post(&id).await.map_err(map_client_error)?;
            if json {
                print_json(&serde_json::json!({ "id": id, "message": message }))?;
            } else {
                println!("Пост удалён: id={id}");
            }
        }
        Command::Reset => {
            let message = client.reset().await.map_err(map_client_error)?;
            if json {
                print_json(&serde_json::json!({ "message": message }))?;
            } else {
                println!("Хранилище очищено: {message}");
            }
        }
        Command::Health => {
            let status = client.health().await.map_err(map_client_error)?;
            if json {
                print_json(&serde_json::json!({ "status": status }))?;
            } else {
                println!("Сервер доступен: {status}");
            }
        }
    }

    Ok(())
}

struct UpdateArgs {
    title: String,
    content: Option<String>,
    category: Option<String>,
    image_url: Option<String>,
    markdown: Option<bool>,
}

fn merge_update(current: &Post, args: UpdateArgs) -> PostInput {
    PostInput {
        title: args.title,
        content: args.content.unwrap_or_else(|| current.content.clone()),
        image_url: Some(args.image_url.unwrap_or_else(|| current.image_url.clone())),
        category: args.category.unwrap_or_else(|| current.category.clone()),
        is_markdown: args.markdown.unwrap_or(current.is_markdown),
    }
}

fn resolve_server(server: Option<String>) -> String {
    let raw = server.unwrap_or_else(|| DEFAULT_HTTP_SERVER.to_string());
    normalize_server(raw)
}

fn normalize_server(server: String) -> String {
    if server.starts_with("http://") || server.starts_with("https://") {
        return server;
    }

    format!("http://{server}")
}

fn map_client_error(err: BlogClientError) -> anyhow::Error {
    let message = match err {
        BlogClientError::Validation(message) => format!("некорректный запрос: {message}"),
        BlogClientError::NotFound(message) => format!("пост не найден: {message}"),
        BlogClientError::Forbidden(message) => format!("операция запрещена: {message}"),
        BlogClientError::Server { status, message } => {
            format!("ошибка сервера ({status}): {message}")
        }
        BlogClientError::Decode(message) => format!("неожиданный ответ сервера: {message}"),
        BlogClientError::Http(err) => format!("ошибка HTTP: {err}"),
    };
    anyhow::anyhow!(message)
}

fn print_json(value: &impl serde::Serialize) -> Result<()> {
    println!(
        "{}",
        serde_json::to_string_pretty(value).context("не удалось сериализовать ответ")?
    );
    Ok(())
}

fn output_post(json: bool, title: &str, post: &Post) -> Result<()> {
    if json {
        return print_json(post);
    }
    print_post(title, post);
    Ok(())
}

fn print_post(title: &str, post: &Post) {
    println!("{title}");
    println!("id: {}", post.id);
    println!("title: {}", post.title);
    println!("category: {}", post.category);
    if !post.image_url.is_empty() {
        println!("image_url: {}", post.image_url);
    }
    println!("markdown: {}", post.is_markdown);
    println!("created_at: {}", post.created_at);
    println!("updated_at: {}", post.updated_at);
    println!();
    println!("{}", post.content);
}

fn print_list(list: &PostPage) {
    let pagination = &list.pagination;
    println!(
        "Постов: {} (страница {}/{}, limit={}, total={})",
        list.posts.len(),
        pagination.page,
        pagination.total_pages,
        pagination.limit,
        pagination.total
    );

    for post in &list.posts {
        println!(
            "- [{}] {} ({}, {})",
            post.id,
            post.title,
            post.category,
            post.created_at.format("%Y-%m-%d")
        );
    }
}
