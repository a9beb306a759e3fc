//! Built-in sentence bank used to initialize `sentence_bank`.
//!
//! Entries carry the denormalized keyword annotations shown on the sentence
//! card; `category`/`difficulty`/`source` drive filtering and stats.

use crate::db::operations::sentences::{Keyword, NewSentence};

pub struct BankKeyword {
    pub word: &'static str,
    pub phonetic: &'static str,
    pub meaning: &'static str,
    pub part_of_speech: &'static str,
}

pub struct BankEntry {
    pub content: &'static str,
    pub translation: &'static str,
    pub keywords: &'static [BankKeyword],
    pub category: &'static str,
    pub difficulty: &'static str,
    pub source: &'static str,
}

impl BankEntry {
    pub fn keyword_list(&self) -> Vec<Keyword> {
        self.keywords
            .iter()
            .map(|k| Keyword {
                word: k.word.to_string(),
                phonetic: k.phonetic.to_string(),
                meaning: k.meaning.to_string(),
                part_of_speech: k.part_of_speech.to_string(),
            })
            .collect()
    }

    pub fn to_new_sentence(&self) -> NewSentence {
        NewSentence {
            content: self.content.to_string(),
            translation: self.translation.to_string(),
            keywords: self.keyword_list(),
            category: self.category.to_string(),
            difficulty: self.difficulty.to_string(),
            source: self.source.to_string(),
        }
    }
}

pub const SEED_BANK: &[BankEntry] = &[
    BankEntry {
        content: "The early bird catches the worm.",
        translation: "早起的鸟儿有虫吃。",
        keywords: &[
            BankKeyword { word: "early", phonetic: "/ˈɜːrli/", meaning: "早的，提前的", part_of_speech: "adj." },
            BankKeyword { word: "catches", phonetic: "/ˈkætʃɪz/", meaning: "抓住，捕获", part_of_speech: "v." },
            BankKeyword { word: "worm", phonetic: "/wɜːrm/", meaning: "虫子", part_of_speech: "n." },
        ],
        category: "proverb",
        difficulty: "medium",
        source: "classic",
    },
    BankEntry {
        content: "Practice makes perfect.",
        translation: "熟能生巧。",
        keywords: &[
            BankKeyword { word: "practice", phonetic: "/ˈpræktɪs/", meaning: "练习，实践", part_of_speech: "n./v." },
            BankKeyword { word: "perfect", phonetic: "/ˈpɜːrfɪkt/", meaning: "完美的", part_of_speech: "adj." },
        ],
        category: "proverb",
        difficulty: "easy",
        source: "classic",
    },
    BankEntry {
        content: "Time is money.",
        translation: "时间就是金钱。",
        keywords: &[
            BankKeyword { word: "time", phonetic: "/taɪm/", meaning: "时间", part_of_speech: "n." },
            BankKeyword { word: "money", phonetic: "/ˈmʌni/", meaning: "金钱", part_of_speech: "n." },
        ],
        category: "proverb",
        difficulty: "easy",
        source: "classic",
    },
    BankEntry {
        content: "Knowledge is power.",
        translation: "知识就是力量。",
        keywords: &[
            BankKeyword { word: "knowledge", phonetic: "/ˈnɑːlɪdʒ/", meaning: "知识", part_of_speech: "n." },
            BankKeyword { word: "power", phonetic: "/ˈpaʊər/", meaning: "力量，权力", part_of_speech: "n." },
        ],
        category: "proverb",
        difficulty: "medium",
        source: "classic",
    },
    BankEntry {
        content: "Actions speak louder than words.",
        translation: "行动胜过言语。",
        keywords: &[
            BankKeyword { word: "actions", phonetic: "/ˈækʃənz/", meaning: "行动", part_of_speech: "n." },
            BankKeyword { word: "louder", phonetic: "/ˈlaʊdər/", meaning: "更大声的", part_of_speech: "adj." },
        ],
        category: "proverb",
        difficulty: "medium",
        source: "classic",
    },
    BankEntry {
        content: "Where there is a will, there is a way.",
        translation: "有志者事竟成。",
        keywords: &[
            BankKeyword { word: "will", phonetic: "/wɪl/", meaning: "意志，决心", part_of_speech: "n." },
            BankKeyword { word: "way", phonetic: "/weɪ/", meaning: "方法，道路", part_of_speech: "n." },
        ],
        category: "proverb",
        difficulty: "medium",
        source: "classic",
    },
    BankEntry {
        content: "Rome wasn't built in a day.",
        translation: "罗马不是一天建成的。",
        keywords: &[
            BankKeyword { word: "Rome", phonetic: "/roʊm/", meaning: "罗马", part_of_speech: "n." },
            BankKeyword { word: "built", phonetic: "/bɪlt/", meaning: "建造", part_of_speech: "v." },
        ],
        category: "proverb",
        difficulty: "medium",
        source: "classic",
    },
    BankEntry {
        content: "Better late than never.",
        translation: "迟做总比不做好。",
        keywords: &[
            BankKeyword { word: "better", phonetic: "/ˈbetər/", meaning: "更好的", part_of_speech: "adj." },
            BankKeyword { word: "late", phonetic: "/leɪt/", meaning: "迟的", part_of_speech: "adj." },
            BankKeyword { word: "never", phonetic: "/ˈnevər/", meaning: "从不", part_of_speech: "adv." },
        ],
        category: "proverb",
        difficulty: "easy",
        source: "classic",
    },
    BankEntry {
        content: "Every cloud has a silver lining.",
        translation: "黑暗中总有一线光明。",
        keywords: &[
            BankKeyword { word: "cloud", phonetic: "/klaʊd/", meaning: "云", part_of_speech: "n." },
            BankKeyword { word: "silver", phonetic: "/ˈsɪlvər/", meaning: "银色的", part_of_speech: "adj." },
            BankKeyword { word: "lining", phonetic: "/ˈlaɪnɪŋ/", meaning: "内衬", part_of_speech: "n." },
        ],
        category: "proverb",
        difficulty: "hard",
        source: "classic",
    },
    BankEntry {
        content: "Don't judge a book by its cover.",
        translation: "不要以貌取人。",
        keywords: &[
            BankKeyword { word: "judge", phonetic: "/dʒʌdʒ/", meaning: "判断", part_of_speech: "v." },
            BankKeyword { word: "cover", phonetic: "/ˈkʌvər/", meaning: "封面", part_of_speech: "n." },
        ],
        category: "proverb",
        difficulty: "medium",
        source: "classic",
    },
    BankEntry {
        content: "A picture is worth a thousand words.",
        translation: "一图胜千言。",
        keywords: &[
            BankKeyword { word: "picture", phonetic: "/ˈpɪktʃər/", meaning: "图片", part_of_speech: "n." },
            BankKeyword { word: "worth", phonetic: "/wɜːrθ/", meaning: "值得", part_of_speech: "adj." },
            BankKeyword { word: "thousand", phonetic: "/ˈθaʊzənd/", meaning: "千", part_of_speech: "num." },
        ],
        category: "proverb",
        difficulty: "medium",
        source: "classic",
    },
    BankEntry {
        content: "When in Rome, do as the Romans do.",
        translation: "入乡随俗。",
        keywords: &[
            BankKeyword { word: "Romans", phonetic: "/ˈroʊmənz/", meaning: "罗马人", part_of_speech: "n." },
        ],
        category: "proverb",
        difficulty: "medium",
        source: "classic",
    },
    BankEntry {
        content: "The pen is mightier than the sword.",
        translation: "笔比剑更有力量。",
        keywords: &[
            BankKeyword { word: "pen", phonetic: "/pen/", meaning: "笔", part_of_speech: "n." },
            BankKeyword { word: "mightier", phonetic: "/ˈmaɪtiər/", meaning: "更强大的", part_of_speech: "adj." },
            BankKeyword { word: "sword", phonetic: "/sɔːrd/", meaning: "剑", part_of_speech: "n." },
        ],
        category: "proverb",
        difficulty: "hard",
        source: "classic",
    },
    BankEntry {
        content: "All that glitters is not gold.",
        translation: "闪光的不一定都是金子。",
        keywords: &[
            BankKeyword { word: "glitters", phonetic: "/ˈɡlɪtərz/", meaning: "闪光", part_of_speech: "v." },
            BankKeyword { word: "gold", phonetic: "/ɡoʊld/", meaning: "金子", part_of_speech: "n." },
        ],
        category: "proverb",
        difficulty: "medium",
        source: "classic",
    },
    BankEntry {
        content: "Honesty is the best policy.",
        translation: "诚实为上策。",
        keywords: &[
            BankKeyword { word: "honesty", phonetic: "/ˈɑːnəsti/", meaning: "诚实", part_of_speech: "n." },
            BankKeyword { word: "policy", phonetic: "/ˈpɑːləsi/", meaning: "政策，策略", part_of_speech: "n." },
        ],
        category: "proverb",
        difficulty: "medium",
        source: "classic",
    },
    BankEntry {
        content: "Fortune favors the bold.",
        translation: "幸运眷顾勇敢的人。",
        keywords: &[
            BankKeyword { word: "fortune", phonetic: "/ˈfɔːrtʃən/", meaning: "幸运，财富", part_of_speech: "n." },
            BankKeyword { word: "favors", phonetic: "/ˈfeɪvərz/", meaning: "偏爱", part_of_speech: "v." },
            BankKeyword { word: "bold", phonetic: "/boʊld/", meaning: "勇敢的", part_of_speech: "adj." },
        ],
        category: "proverb",
        difficulty: "hard",
        source: "classic",
    },
    BankEntry {
        content: "No pain, no gain.",
        translation: "没有付出就没有收获。",
        keywords: &[
            BankKeyword { word: "pain", phonetic: "/peɪn/", meaning: "痛苦", part_of_speech: "n." },
            BankKeyword { word: "gain", phonetic: "/ɡeɪn/", meaning: "收获", part_of_speech: "n." },
        ],
        category: "proverb",
        difficulty: "easy",
        source: "classic",
    },
    BankEntry {
        content: "The grass is always greener on the other side.",
        translation: "这山望着那山高。",
        keywords: &[
            BankKeyword { word: "grass", phonetic: "/ɡræs/", meaning: "草", part_of_speech: "n." },
            BankKeyword { word: "greener", phonetic: "/ˈɡriːnər/", meaning: "更绿的", part_of_speech: "adj." },
        ],
        category: "proverb",
        difficulty: "medium",
        source: "classic",
    },
    BankEntry {
        content: "You can't have your cake and eat it too.",
        translation: "鱼与熊掌不可兼得。",
        keywords: &[
            BankKeyword { word: "cake", phonetic: "/keɪk/", meaning: "蛋糕", part_of_speech: "n." },
        ],
        category: "proverb",
        difficulty: "medium",
        source: "classic",
    },
    BankEntry {
        content: "A journey of a thousand miles begins with a single step.",
        translation: "千里之行，始于足下。",
        keywords: &[
            BankKeyword { word: "journey", phonetic: "/ˈdʒɜːrni/", meaning: "旅程", part_of_speech: "n." },
            BankKeyword { word: "single", phonetic: "/ˈsɪŋɡəl/", meaning: "单一的", part_of_speech: "adj." },
            BankKeyword { word: "step", phonetic: "/step/", meaning: "步骤", part_of_speech: "n." },
        ],
        category: "proverb",
        difficulty: "medium",
        source: "classic",
    },
    BankEntry {
        content: "The only way to do great work is to love what you do.",
        translation: "做出伟大工作的唯一方法就是热爱你所做的事。",
        keywords: &[
            BankKeyword { word: "great", phonetic: "/ɡreɪt/", meaning: "伟大的", part_of_speech: "adj." },
            BankKeyword { word: "love", phonetic: "/lʌv/", meaning: "热爱", part_of_speech: "v." },
        ],
        category: "motivation",
        difficulty: "medium",
        source: "steve_jobs",
    },
    BankEntry {
        content: "Innovation distinguishes between a leader and a follower.",
        translation: "创新区分了领导者和追随者。",
        keywords: &[
            BankKeyword { word: "innovation", phonetic: "/ˌɪnəˈveɪʃən/", meaning: "创新", part_of_speech: "n." },
            BankKeyword { word: "distinguishes", phonetic: "/dɪˈstɪŋɡwɪʃɪz/", meaning: "区分", part_of_speech: "v." },
            BankKeyword { word: "leader", phonetic: "/ˈliːdər/", meaning: "领导者", part_of_speech: "n." },
            BankKeyword { word: "follower", phonetic: "/ˈfɑːloʊər/", meaning: "追随者", part_of_speech: "n." },
        ],
        category: "business",
        difficulty: "hard",
        source: "steve_jobs",
    },
    BankEntry {
        content: "Life is what happens to you while you're busy making other plans.",
        translation: "生活就是当你忙于制定其他计划时发生在你身上的事情。",
        keywords: &[
            BankKeyword { word: "happens", phonetic: "/ˈhæpənz/", meaning: "发生", part_of_speech: "v." },
            BankKeyword { word: "busy", phonetic: "/ˈbɪzi/", meaning: "忙碌的", part_of_speech: "adj." },
            BankKeyword { word: "plans", phonetic: "/plænz/", meaning: "计划", part_of_speech: "n." },
        ],
        category: "philosophy",
        difficulty: "medium",
        source: "john_lennon",
    },
    BankEntry {
        content: "Be yourself; everyone else is already taken.",
        translation: "做你自己，因为其他人都已经有人做了。",
        keywords: &[
            BankKeyword { word: "yourself", phonetic: "/jərˈself/", meaning: "你自己", part_of_speech: "pron." },
            BankKeyword { word: "taken", phonetic: "/ˈteɪkən/", meaning: "被占据的", part_of_speech: "adj." },
        ],
        category: "motivation",
        difficulty: "easy",
        source: "oscar_wilde",
    },
    BankEntry {
        content: "In the middle of difficulty lies opportunity.",
        translation: "在困难的中心蕴藏着机会。",
        keywords: &[
            BankKeyword { word: "middle", phonetic: "/ˈmɪdəl/", meaning: "中间", part_of_speech: "n." },
            BankKeyword { word: "difficulty", phonetic: "/ˈdɪfɪkəlti/", meaning: "困难", part_of_speech: "n." },
            BankKeyword { word: "opportunity", phonetic: "/ˌɑːpərˈtuːnəti/", meaning: "机会", part_of_speech: "n." },
        ],
        category: "motivation",
        difficulty: "medium",
        source: "einstein",
    },
    BankEntry {
        content: "Success is not final, failure is not fatal.",
        translation: "成功不是终点，失败不是致命的。",
        keywords: &[
            BankKeyword { word: "success", phonetic: "/səkˈses/", meaning: "成功", part_of_speech: "n." },
            BankKeyword { word: "final", phonetic: "/ˈfaɪnəl/", meaning: "最终的", part_of_speech: "adj." },
            BankKeyword { word: "failure", phonetic: "/ˈfeɪljər/", meaning: "失败", part_of_speech: "n." },
            BankKeyword { word: "fatal", phonetic: "/ˈfeɪtəl/", meaning: "致命的", part_of_speech: "adj." },
        ],
        category: "motivation",
        difficulty: "medium",
        source: "churchill",
    },
    BankEntry {
        content: "The future belongs to those who believe in the beauty of their dreams.",
        translation: "未来属于那些相信自己梦想之美的人。",
        keywords: &[
            BankKeyword { word: "future", phonetic: "/ˈfjuːtʃər/", meaning: "未来", part_of_speech: "n." },
            BankKeyword { word: "belongs", phonetic: "/bɪˈlɔːŋz/", meaning: "属于", part_of_speech: "v." },
            BankKeyword { word: "beauty", phonetic: "/ˈbjuːti/", meaning: "美丽", part_of_speech: "n." },
            BankKeyword { word: "dreams", phonetic: "/driːmz/", meaning: "梦想", part_of_speech: "n." },
        ],
        category: "motivation",
        difficulty: "medium",
        source: "eleanor_roosevelt",
    },
    BankEntry {
        content: "The way to get started is to quit talking and begin doing.",
        translation: "开始的方法就是停止空谈，开始行动。",
        keywords: &[
            BankKeyword { word: "started", phonetic: "/ˈstɑːrtəd/", meaning: "开始", part_of_speech: "v." },
            BankKeyword { word: "quit", phonetic: "/kwɪt/", meaning: "停止", part_of_speech: "v." },
            BankKeyword { word: "talking", phonetic: "/ˈtɔːkɪŋ/", meaning: "谈话", part_of_speech: "v." },
        ],
        category: "motivation",
        difficulty: "medium",
        source: "walt_disney",
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seed_bank_has_no_duplicate_contents() {
        let mut seen = std::collections::HashSet::new();
        for entry in SEED_BANK {
            assert!(seen.insert(entry.content), "duplicate: {}", entry.content);
        }
    }

    #[test]
    fn seed_entries_convert_with_keywords() {
        let sentence = SEED_BANK[0].to_new_sentence();
        assert_eq!(sentence.content, "The early bird catches the worm.");
        assert_eq!(sentence.keywords.len(), 3);
        assert_eq!(sentence.keywords[0].word, "early");
    }
}
