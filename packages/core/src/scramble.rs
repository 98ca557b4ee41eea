//! 字母打乱与提示

use crate::random::RandomSource;

/// 提示中遮盖字母使用的占位符
pub const HINT_PLACEHOLDER: char = '_';

/// 打乱单词的字母顺序
///
/// Fisher-Yates 洗牌。若结果恰好与原词相同且原词至少包含两种不同字符，
/// 整体左移一位，保证玩家看到的形式与答案不同。
pub fn scramble<R: RandomSource + ?Sized>(word: &str, rng: &mut R) -> String {
    let mut chars: Vec<char> = word.chars().collect();
    for i in (1..chars.len()).rev() {
        let j = rng.next_index(i + 1);
        chars.swap(i, j);
    }

    let scrambled: String = chars.iter().collect();
    if scrambled == word && has_distinct_chars(&chars) {
        chars.rotate_left(1);
        return chars.into_iter().collect();
    }
    scrambled
}

/// 生成提示：保留首尾字母，中间用占位符遮盖
///
/// 一到两个字母的单词没有中间部分，原样返回。
pub fn hint_for(word: &str) -> String {
    let chars: Vec<char> = word.chars().collect();
    match chars.len() {
        0..=2 => word.to_string(),
        n => {
            let mut hint = String::with_capacity(word.len());
            hint.push(chars[0]);
            hint.extend(std::iter::repeat(HINT_PLACEHOLDER).take(n - 2));
            hint.push(chars[n - 1]);
            hint
        }
    }
}

fn has_distinct_chars(chars: &[char]) -> bool {
    chars.windows(2).any(|pair| pair[0] != pair[1])
}
