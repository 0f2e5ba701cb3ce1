use strum::{Display, EnumString};

#[derive(EnumString, Display, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[strum(ascii_case_insensitive)]
pub enum Locale {
    #[default]
    #[strum(serialize = "en")]
    En,
    #[strum(serialize = "zh-CN")]
    ZhCn,
}

/// Every user-facing string the dashboard shows.
#[derive(Debug)]
pub struct Messages {
    pub url_required: &'static str,
    pub created: &'static str,
    pub create_failed: &'static str,
    pub deleted: &'static str,
    pub delete_failed: &'static str,
    pub network_error: &'static str,
    pub confirm_delete: &'static str,
    pub no_links: &'static str,
    pub submit_idle: &'static str,
    pub submit_busy: &'static str,
    pub delete_label: &'static str,
    pub short_link_label: &'static str,
    pub long_link_label: &'static str,
    pub total_links_label: &'static str,
    pub total_hits_label: &'static str,
    pub hits_label: &'static str,
    pub created_at_label: &'static str,
    pub copy_label: &'static str,
    pub copied: &'static str,
    pub copy_failed: &'static str,
}

const EN: Messages = Messages {
    url_required: "Please enter a URL to shorten",
    created: "Short link created!",
    create_failed: "Failed to create short link",
    deleted: "Short link deleted",
    delete_failed: "Failed to delete short link",
    network_error: "Network error, please try again",
    confirm_delete: "Delete this short link?",
    no_links: "No short links yet",
    submit_idle: "Create short link",
    submit_busy: "Creating...",
    delete_label: "Delete",
    short_link_label: "Short link",
    long_link_label: "Original link",
    total_links_label: "Total links",
    total_hits_label: "Total hits",
    hits_label: "Hits",
    created_at_label: "Created",
    copy_label: "Copy short link",
    copied: "Copied to clipboard",
    copy_failed: "Failed to copy short link",
};

const ZH_CN: Messages = Messages {
    url_required: "请输入要缩短的 URL",
    created: "短链接创建成功！",
    create_failed: "创建短链接失败",
    deleted: "短链接已删除",
    delete_failed: "删除失败",
    network_error: "网络错误，请稍后重试",
    confirm_delete: "确定要删除这个短链接吗？",
    no_links: "暂无短链接",
    submit_idle: "创建短链接",
    submit_busy: "创建中...",
    delete_label: "删除",
    short_link_label: "短链接",
    long_link_label: "原始链接",
    total_links_label: "短链接总数",
    total_hits_label: "总访问次数",
    hits_label: "访问次数",
    created_at_label: "创建时间",
    copy_label: "复制短链接",
    copied: "已复制到剪贴板",
    copy_failed: "复制失败",
};

impl Locale {
    pub fn messages(self) -> &'static Messages {
        match self {
            Locale::En => &EN,
            Locale::ZhCn => &ZH_CN,
        }
    }

    /// `chrono` format string matching the locale's usual date-time layout.
    pub(crate) fn timestamp_format(self) -> &'static str {
        match self {
            Locale::En => "%-m/%-d/%Y, %-I:%M:%S %p",
            Locale::ZhCn => "%Y/%-m/%-d %H:%M:%S",
        }
    }
}
