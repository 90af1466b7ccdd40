use r2d2::{Pool, PooledConnection};
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::{OptionalExtension, Result};

use crate::core::config;
use crate::storage::migrations::run_migrations;

/// Структура, представляющая пользователя в базе данных.
pub struct User {
    /// Telegram ID пользователя
    pub telegram_id: i64,
    /// Имя пользователя в Telegram, если доступно
    pub first_name: Option<String>,
    /// Фамилия пользователя в Telegram, если доступна
    pub last_name: Option<String>,
    /// Реферальный код, по которому пользователь пришёл (если был deep link)
    pub referrer: Option<String>,
    /// Текущая позиция пользователя в каталоге
    pub page: i64,
    /// Код языка интерфейса: "ru", "en"
    pub language: String,
}

/// Запись каталога NFT.
///
/// Позиции нумеруются с нуля и совпадают с порядком строк в таблице.
#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize)]
pub struct CatalogueItem {
    /// Позиция в каталоге (нумерация с нуля)
    #[serde(default)]
    pub index: i64,
    /// Название NFT
    pub name: String,
    /// Ссылка на изображение
    pub image: String,
    /// Описание
    pub description: String,
}

pub type DbPool = Pool<SqliteConnectionManager>;
pub type DbConnection = PooledConnection<SqliteConnectionManager>;

/// Create a new database connection pool
///
/// Initializes a connection pool and runs schema migrations on the first connection.
///
/// # Arguments
///
/// * `database_path` - Path to SQLite database file
pub fn create_pool(database_path: &str) -> anyhow::Result<DbPool> {
    let manager = SqliteConnectionManager::file(database_path);
    let pool = Pool::builder().max_size(config::db::MAX_POOL_SIZE).build(manager)?;

    let mut conn = pool.get()?;
    run_migrations(&mut conn)?;

    Ok(pool)
}

/// Get a connection from the pool
///
/// The connection is automatically returned to the pool when dropped.
pub fn get_connection(pool: &DbPool) -> Result<DbConnection, r2d2::Error> {
    pool.get()
}

/// Создает нового пользователя в базе данных.
///
/// # Arguments
///
/// * `conn` - Соединение с базой данных
/// * `telegram_id` - Telegram ID пользователя
/// * `first_name` - Имя пользователя (опционально)
/// * `last_name` - Фамилия пользователя (опционально)
/// * `referrer` - Реферальный код из deep link (опционально)
///
/// # Errors
///
/// Возвращает ошибку если пользователь с таким ID уже существует или произошла ошибка БД.
pub fn create_user(
    conn: &DbConnection,
    telegram_id: i64,
    first_name: Option<&str>,
    last_name: Option<&str>,
    referrer: Option<&str>,
) -> Result<()> {
    conn.execute(
        "INSERT INTO users (telegram_id, first_name, last_name, referrer, page) VALUES (?1, ?2, ?3, ?4, 0)",
        &[
            &telegram_id as &dyn rusqlite::ToSql,
            &first_name as &dyn rusqlite::ToSql,
            &last_name as &dyn rusqlite::ToSql,
            &referrer as &dyn rusqlite::ToSql,
        ],
    )?;
    Ok(())
}

/// Получает пользователя из базы данных по Telegram ID.
///
/// # Returns
///
/// Возвращает `Ok(Some(User))` если пользователь найден, `Ok(None)` если не найден,
/// или ошибку базы данных.
pub fn get_user(conn: &DbConnection, telegram_id: i64) -> Result<Option<User>> {
    let mut stmt = conn.prepare(
        "SELECT telegram_id, first_name, last_name, referrer, page, language FROM users WHERE telegram_id = ?",
    )?;
    let mut rows = stmt.query(&[&telegram_id as &dyn rusqlite::ToSql])?;

    if let Some(row) = rows.next()? {
        Ok(Some(User {
            telegram_id: row.get(0)?,
            first_name: row.get(1)?,
            last_name: row.get(2)?,
            referrer: row.get(3)?,
            page: row.get(4)?,
            language: row.get(5).unwrap_or_else(|_| "ru".to_string()),
        }))
    } else {
        Ok(None)
    }
}

/// Получает текущую позицию пользователя в каталоге.
///
/// Возвращает `Ok(None)` если пользователя нет в базе.
pub fn get_user_page(conn: &DbConnection, telegram_id: i64) -> Result<Option<i64>> {
    conn.query_row(
        "SELECT page FROM users WHERE telegram_id = ?",
        &[&telegram_id as &dyn rusqlite::ToSql],
        |row| row.get(0),
    )
    .optional()
}

/// Устанавливает позицию пользователя в каталоге.
///
/// Если пользователя ещё нет, строка создаётся с указанной позицией
/// (первое взаимодействие через callback, без /start).
pub fn set_user_page(conn: &DbConnection, telegram_id: i64, page: i64) -> Result<()> {
    conn.execute(
        "INSERT INTO users (telegram_id, page) VALUES (?1, ?2)
         ON CONFLICT(telegram_id) DO UPDATE SET page = excluded.page",
        &[&telegram_id as &dyn rusqlite::ToSql, &page as &dyn rusqlite::ToSql],
    )?;
    Ok(())
}

/// Получает код языка пользователя ("ru" по умолчанию).
pub fn get_user_language(conn: &DbConnection, telegram_id: i64) -> Result<String> {
    let lang: Option<String> = conn
        .query_row(
            "SELECT language FROM users WHERE telegram_id = ?",
            &[&telegram_id as &dyn rusqlite::ToSql],
            |row| row.get(0),
        )
        .optional()?;
    Ok(lang.unwrap_or_else(|| "ru".to_string()))
}

/// Устанавливает код языка пользователя.
pub fn set_user_language(conn: &DbConnection, telegram_id: i64, language: &str) -> Result<()> {
    conn.execute(
        "UPDATE users SET language = ?1 WHERE telegram_id = ?2",
        &[&language as &dyn rusqlite::ToSql, &telegram_id as &dyn rusqlite::ToSql],
    )?;
    Ok(())
}

/// Получает запись каталога по позиции.
///
/// # Returns
///
/// Возвращает `Ok(Some(CatalogueItem))` если запись найдена, `Ok(None)` если не найдена.
pub fn get_catalogue_item(conn: &DbConnection, index: i64) -> Result<Option<CatalogueItem>> {
    let mut stmt = conn.prepare("SELECT idx, name, image, description FROM catalogue WHERE idx = ?")?;
    let mut rows = stmt.query(&[&index as &dyn rusqlite::ToSql])?;

    if let Some(row) = rows.next()? {
        Ok(Some(CatalogueItem {
            index: row.get(0)?,
            name: row.get(1)?,
            image: row.get(2)?,
            description: row.get(3)?,
        }))
    } else {
        Ok(None)
    }
}

/// Возвращает количество записей в каталоге.
pub fn count_catalogue(conn: &DbConnection) -> Result<i64> {
    conn.query_row("SELECT COUNT(*) FROM catalogue", [], |row| row.get(0))
}

/// Возвращает пары (name, idx) всех записей каталога в порядке позиций.
pub fn list_catalogue(conn: &DbConnection) -> Result<Vec<(String, i64)>> {
    let mut stmt = conn.prepare("SELECT name, idx FROM catalogue ORDER BY idx")?;
    let rows = stmt.query_map([], |row| Ok((row.get::<_, String>(0)?, row.get::<_, i64>(1)?)))?;

    let mut items = Vec::new();
    for row in rows {
        items.push(row?);
    }
    Ok(items)
}

/// Добавляет запись в каталог (используется сидером и тестами).
pub fn insert_catalogue_item(conn: &DbConnection, item: &CatalogueItem) -> Result<()> {
    conn.execute(
        "INSERT INTO catalogue (idx, name, image, description) VALUES (?1, ?2, ?3, ?4)
         ON CONFLICT(idx) DO UPDATE SET name = excluded.name, image = excluded.image,
         description = excluded.description",
        &[
            &item.index as &dyn rusqlite::ToSql,
            &item.name as &dyn rusqlite::ToSql,
            &item.image as &dyn rusqlite::ToSql,
            &item.description as &dyn rusqlite::ToSql,
        ],
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_pool() -> (tempfile::TempDir, DbPool) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("test.sqlite");
        let pool = create_pool(path.to_str().unwrap()).unwrap();
        (dir, pool)
    }

    #[test]
    fn creates_and_reads_user() {
        let (_dir, pool) = test_pool();
        let conn = get_connection(&pool).unwrap();

        create_user(&conn, 42, Some("Ivan"), None, Some("ref123")).unwrap();

        let user = get_user(&conn, 42).unwrap().unwrap();
        assert_eq!(user.telegram_id, 42);
        assert_eq!(user.first_name.as_deref(), Some("Ivan"));
        assert_eq!(user.referrer.as_deref(), Some("ref123"));
        assert_eq!(user.page, 0);

        assert!(get_user(&conn, 43).unwrap().is_none());
    }

    #[test]
    fn page_upsert_creates_missing_row() {
        let (_dir, pool) = test_pool();
        let conn = get_connection(&pool).unwrap();

        assert_eq!(get_user_page(&conn, 7).unwrap(), None);

        set_user_page(&conn, 7, 3).unwrap();
        assert_eq!(get_user_page(&conn, 7).unwrap(), Some(3));

        set_user_page(&conn, 7, 0).unwrap();
        assert_eq!(get_user_page(&conn, 7).unwrap(), Some(0));
    }

    #[test]
    fn catalogue_round_trip() {
        let (_dir, pool) = test_pool();
        let conn = get_connection(&pool).unwrap();

        for i in 0..3 {
            insert_catalogue_item(
                &conn,
                &CatalogueItem {
                    index: i,
                    name: format!("NFT #{}", i),
                    image: format!("https://cdn.example/{}.png", i),
                    description: format!("item {}", i),
                },
            )
            .unwrap();
        }

        assert_eq!(count_catalogue(&conn).unwrap(), 3);

        let item = get_catalogue_item(&conn, 1).unwrap().unwrap();
        assert_eq!(item.name, "NFT #1");
        assert!(get_catalogue_item(&conn, 99).unwrap().is_none());

        let list = list_catalogue(&conn).unwrap();
        assert_eq!(
            list,
            vec![
                ("NFT #0".to_string(), 0),
                ("NFT #1".to_string(), 1),
                ("NFT #2".to_string(), 2)
            ]
        );
    }
}
