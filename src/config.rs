/// 変換時の固定値
#[derive(Debug, Clone)]
pub struct ConvertConfig {
    /// 最初のノードID（出力では負数）
    pub first_node_id: u32,
    pub timestamp: String,
    /// `source` タグの値
    pub source: String,
    pub generator: String,
    /// fixme タグを出力する
    pub emit_fixme: bool,
}

pub const DEFAULT_FIRST_NODE_ID: u32 = 31337;
pub const DEFAULT_TIMESTAMP: &str = "2012-05-30T09:25:57";
pub const DEFAULT_SOURCE: &str = "Belfast City Council 2012";
pub const DEFAULT_GENERATOR: &str = concat!("belfast-trees ", env!("CARGO_PKG_VERSION"));

impl Default for ConvertConfig {
    fn default() -> Self {
        Self {
            first_node_id: DEFAULT_FIRST_NODE_ID,
            timestamp: DEFAULT_TIMESTAMP.to_string(),
            source: DEFAULT_SOURCE.to_string(),
            generator: DEFAULT_GENERATOR.to_string(),
            emit_fixme: false,
        }
    }
}
