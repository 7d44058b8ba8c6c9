use anyhow::{Context, Result};
use belfast_trees::config::{DEFAULT_FIRST_NODE_ID, DEFAULT_SOURCE};
use belfast_trees::{convert, ConvertConfig};
use clap::Parser;
use std::fs::File;
use std::io::{self, BufReader, BufWriter};
use std::path::PathBuf;
use tracing::info;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// 入力XMLファイル（ベルファスト市の樹木データ）
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// 最初のノードID（負数で出力）
    #[arg(long, default_value_t = DEFAULT_FIRST_NODE_ID)]
    first_id: u32,

    /// source タグの値
    #[arg(long, default_value = DEFAULT_SOURCE)]
    source: String,

    /// 要確認の樹木に fixme タグを付ける
    #[arg(long)]
    fixme: bool,
}

fn main() -> Result<()> {
    // ログの初期化（標準出力はOSM XML用）
    tracing_subscriber::fmt().with_writer(io::stderr).init();

    // 引数が不正な場合 clap が使い方を表示し終了コード2で終了
    let args = Args::parse();

    let start_time = std::time::Instant::now();

    let file = File::open(&args.input)
        .with_context(|| format!("Failed to open {}", args.input.display()))?;
    let reader = BufReader::new(file);

    let stdout = io::stdout();
    let writer = BufWriter::new(stdout.lock());

    let config = ConvertConfig {
        first_node_id: args.first_id,
        source: args.source,
        emit_fixme: args.fixme,
        ..ConvertConfig::default()
    };

    info!("Processing XML file: {:?}", args.input);
    let summary = convert(reader, writer, &config)
        .with_context(|| format!("Failed to convert {}", args.input.display()))?;

    info!(
        "Written {} nodes ({:?}..{:?}), {} need review",
        summary.nodes_written, summary.first_id, summary.last_id, summary.needs_review
    );
    info!("Total processing time: {:?}", start_time.elapsed());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_id_must_be_non_negative() {
        assert!(Args::try_parse_from(["belfast-trees", "--first-id=-1", "trees.xml"]).is_err());
        assert!(Args::try_parse_from([
            "belfast-trees",
            "--first-id=-9223372036854775808",
            "trees.xml"
        ])
        .is_err());

        let args = Args::try_parse_from(["belfast-trees", "--first-id", "0", "trees.xml"]).unwrap();
        assert_eq!(args.first_id, 0);
    }

    #[test]
    fn test_exactly_one_input() {
        assert!(Args::try_parse_from(["belfast-trees"]).is_err());
        assert!(Args::try_parse_from(["belfast-trees", "a.xml", "b.xml"]).is_err());

        let args = Args::try_parse_from(["belfast-trees", "a.xml"]).unwrap();
        assert_eq!(args.first_id, DEFAULT_FIRST_NODE_ID);
        assert_eq!(args.source, DEFAULT_SOURCE);
        assert!(!args.fixme);
    }
}
