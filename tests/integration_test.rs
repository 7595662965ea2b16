use std::fs;
use std::path::PathBuf;
use timu_manager::{App, Config, ExportQuestion};

/// 为每个测试创建独立的临时工作目录
fn setup_workspace(name: &str) -> (PathBuf, Config) {
    let dir = std::env::temp_dir().join(format!("timu_it_{}_{}", name, std::process::id()));
    fs::remove_dir_all(&dir).ok();
    let import_dir = dir.join("import");
    fs::create_dir_all(&import_dir).unwrap();

    let config = Config {
        db_path: dir.join("timu.db").to_string_lossy().to_string(),
        import_folder: import_dir.to_string_lossy().to_string(),
        export_file: String::new(),
        export_sources: Vec::new(),
        verbose_logging: false,
        output_log_file: dir.join("output.txt").to_string_lossy().to_string(),
    };
    (dir, config)
}

const SAMPLE_TXT: &str = "某年级模拟试卷\n\
    1．中国的首都是哪里？\n\
    A.上海\nB.北京\nC.广州\nD.深圳\n\
    答案：B\n解析：略\n\
    2. 下列属于直辖市的是？\n\
    A.北京\nB.杭州\nC.上海\n\
    答案：AC\n\
    3. 请简述理由。\n\
    答案：言之有理即可\n解析：开放题";

#[tokio::test]
async fn test_txt_import_end_to_end() {
    let (dir, config) = setup_workspace("txt");
    fs::write(dir.join("import/sample.txt"), SAMPLE_TXT).unwrap();

    let app = App::initialize(config).unwrap();
    let stats = app.run().await.unwrap();

    assert_eq!(stats.files_ok, 1);
    assert_eq!(stats.files_failed, 0);
    assert_eq!(stats.imported, 3);

    let records = app.store().fetch_all().unwrap();
    assert_eq!(records.len(), 3);
    // 来源标签统一为文件名
    assert!(records.iter().all(|r| r.source == "sample.txt"));

    // 逐题核对字段（fetch_all 按时间倒序，这里按题干找）
    let capital = records.iter().find(|r| r.title.contains("首都")).unwrap();
    assert_eq!(capital.answer, "B");
    assert_eq!(capital.options().len(), 4);
    let multi = records.iter().find(|r| r.title.contains("直辖市")).unwrap();
    assert_eq!(multi.answer, "AC");
    let open = records.iter().find(|r| r.title.contains("简述")).unwrap();
    assert!(open.options().is_empty());
    assert_eq!(open.answer, "言之有理即可");
    assert_eq!(open.analysis, "开放题");

    fs::remove_dir_all(&dir).ok();
}

#[tokio::test]
async fn test_batch_resilience_one_bad_file() {
    let (dir, config) = setup_workspace("resilience");
    fs::write(dir.join("import/a_good.txt"), "1.第一题\nA.甲\nB.乙\n答案：A").unwrap();
    // 非法 UTF-8 字节序列，读取时即失败
    fs::write(dir.join("import/b_bad.txt"), [0xff_u8, 0xfe, 0x00, 0x41]).unwrap();
    fs::write(dir.join("import/c_good.txt"), "1.另一题\n答案：文字答案").unwrap();

    let app = App::initialize(config).unwrap();
    let stats = app.run().await.unwrap();

    // 坏文件被记录并跳过，好文件全部导入
    assert_eq!(stats.files_ok, 2);
    assert_eq!(stats.files_failed, 1);
    assert_eq!(stats.imported, 2);
    assert_eq!(stats.failures.len(), 1);
    assert_eq!(stats.failures[0].file, "b_bad.txt");

    let sources = app.store().distinct_sources().unwrap();
    assert_eq!(
        sources,
        vec!["a_good.txt".to_string(), "c_good.txt".to_string()]
    );

    fs::remove_dir_all(&dir).ok();
}

#[tokio::test]
async fn test_json_import_upsert_merge() {
    let (dir, mut config) = setup_workspace("upsert");
    fs::write(
        dir.join("import/first.json"),
        r#"[{"id":"q1","title":"旧题干","option":["甲","乙"],"answer":"A"}]"#,
    )
    .unwrap();

    {
        let app = App::initialize(config.clone()).unwrap();
        let stats = app.run().await.unwrap();
        assert_eq!(stats.imported, 1);
    }

    // 第二轮：同ID记录 + 一条新记录，同ID应合并覆盖而非拒绝
    fs::remove_file(dir.join("import/first.json")).unwrap();
    fs::write(
        dir.join("import/second.json"),
        r#"[{"id":"q1","title":"新题干","option":"[\"丙\"]","answer":"B","analysis":"更新"},{"title":"无ID的新题"}]"#,
    )
    .unwrap();

    config.export_file = dir.join("export.json").to_string_lossy().to_string();
    let app = App::initialize(config).unwrap();
    let stats = app.run().await.unwrap();
    assert_eq!(stats.imported, 2);

    let records = app.store().fetch_all().unwrap();
    assert_eq!(records.len(), 2);
    let merged = records.iter().find(|r| r.id == "q1").unwrap();
    assert_eq!(merged.title, "新题干");
    assert_eq!(merged.answer, "B");
    assert_eq!(merged.options(), vec!["丙".to_string()]);

    // 导出文件可完整读回
    let exported: Vec<ExportQuestion> =
        serde_json::from_str(&fs::read_to_string(dir.join("export.json")).unwrap()).unwrap();
    assert_eq!(exported.len(), 2);

    fs::remove_dir_all(&dir).ok();
}

#[tokio::test]
async fn test_export_filtered_by_source() {
    let (dir, mut config) = setup_workspace("export_filter");
    fs::write(dir.join("import/alpha.txt"), "1.甲卷题目\n答案：A").unwrap();
    fs::write(dir.join("import/beta.txt"), "1.乙卷题目\n答案：B").unwrap();

    config.export_file = dir.join("alpha_only.json").to_string_lossy().to_string();
    config.export_sources = vec!["alpha.txt".to_string()];

    let app = App::initialize(config).unwrap();
    let stats = app.run().await.unwrap();
    assert_eq!(stats.imported, 2);

    let exported: Vec<ExportQuestion> =
        serde_json::from_str(&fs::read_to_string(dir.join("alpha_only.json")).unwrap()).unwrap();
    assert_eq!(exported.len(), 1);
    assert!(exported[0].title.contains("甲卷"));

    fs::remove_dir_all(&dir).ok();
}

#[tokio::test]
async fn test_empty_import_folder_is_not_an_error() {
    let (dir, config) = setup_workspace("empty");

    let app = App::initialize(config).unwrap();
    let stats = app.run().await.unwrap();
    assert_eq!(stats.files_ok, 0);
    assert_eq!(stats.imported, 0);

    fs::remove_dir_all(&dir).ok();
}
