//! # First Names Corpus
//!
//! File: cli/src/nlp/names.rs
//!
//! A compact first-names list embedded in the binary. The chunker uses it to
//! spot the start of a person's name. Lookups are case-sensitive: names are
//! stored capitalised, so "bill" in an email address never matches but "Bill"
//! does.
//!
use once_cell::sync::Lazy;
use std::collections::HashSet;

const FIRST_NAMES: &[&str] = &[
    "Aaron", "Abby", "Abigail", "Adam", "Adrian", "Aiden", "Aisha", "Alan", "Albert", "Alex",
    "Alexa", "Alexander", "Alexandra", "Alexis", "Alice", "Alicia", "Alison", "Allen", "Alyssa",
    "Amanda", "Amber", "Amelia", "Amir", "Amy", "Ana", "Andre", "Andrea", "Andrew", "Andy",
    "Angela", "Angie", "Anita", "Ann", "Anna", "Anne", "Annie", "Anthony", "Antonio", "April",
    "Arjun", "Arthur", "Ashley", "Audrey", "Austin", "Ava", "Barbara", "Beatrice", "Becky",
    "Ben", "Benjamin", "Bernard", "Beth", "Betty", "Beverly", "Bill", "Billy", "Bob", "Bobby",
    "Bonnie", "Brad", "Bradley", "Brandon", "Brenda", "Brian", "Brianna", "Bridget", "Brittany",
    "Brooke", "Bruce", "Bryan", "Caleb", "Cameron", "Carl", "Carla", "Carlos", "Carmen", "Carol",
    "Caroline", "Carrie", "Casey", "Catherine", "Cathy", "Cecilia", "Chad", "Charles", "Charlie",
    "Charlotte", "Chelsea", "Cheryl", "Chloe", "Chris", "Christian", "Christina", "Christine",
    "Christopher", "Cindy", "Claire", "Clara", "Claudia", "Colin", "Connor", "Craig", "Crystal",
    "Cynthia", "Dale", "Dan", "Dana", "Daniel", "Danielle", "Danny", "Daria", "Darren", "Dave",
    "David", "Dawn", "Dean", "Deborah", "Debra", "Denise", "Dennis", "Derek", "Diana", "Diane",
    "Diego", "Dominic", "Don", "Donald", "Donna", "Doris", "Dorothy", "Doug", "Douglas", "Dylan",
    "Earl", "Eddie", "Edward", "Eileen", "Elaine", "Eleanor", "Elena", "Eli", "Elijah", "Elizabeth",
    "Ella", "Ellen", "Emily", "Emma", "Eric", "Erica", "Erin", "Ethan", "Eugene", "Eva", "Evan",
    "Evelyn", "Faith", "Fatima", "Felix", "Fernando", "Fiona", "Frances", "Francis", "Frank",
    "Fred", "Frederick", "Gabriel", "Gabriela", "Gail", "Gary", "Gavin", "George", "Gerald",
    "Gina", "Gloria", "Grace", "Grant", "Greg", "Gregory", "Hailey", "Hannah", "Harold", "Harry",
    "Hassan", "Hayden", "Heather", "Heidi", "Helen", "Henry", "Holly", "Howard", "Hugo", "Ian",
    "Irene", "Isaac", "Isabel", "Isabella", "Ivan", "Jack", "Jackie", "Jacob", "Jacqueline",
    "Jake", "James", "Jamie", "Jan", "Jane", "Janet", "Janice", "Jared", "Jasmine", "Jason",
    "Javier", "Jay", "Jean", "Jeff", "Jeffrey", "Jenna", "Jennifer", "Jenny", "Jeremy", "Jerry",
    "Jesse", "Jessica", "Jill", "Jim", "Jimmy", "Joan", "Joanna", "Joe", "Joel", "John", "Johnny",
    "Jon", "Jonathan", "Jordan", "Jorge", "Jose", "Joseph", "Josh", "Joshua", "Joy", "Joyce",
    "Juan", "Judith", "Judy", "Julia", "Julian", "Julie", "Justin", "Kaitlyn", "Karen", "Kate",
    "Katherine", "Kathleen", "Kathy", "Katie", "Kayla", "Keith", "Kelly", "Ken", "Kenji",
    "Kenneth", "Kevin", "Kim", "Kimberly", "Kyle", "Larry", "Laura", "Lauren", "Lawrence", "Leah",
    "Lee", "Leo", "Leon", "Leslie", "Liam", "Lily", "Linda", "Lisa", "Logan", "Lori", "Louis",
    "Louise", "Lucas", "Lucy", "Luis", "Luke", "Lydia", "Lynn", "Madison", "Maggie", "Marcus",
    "Margaret", "Maria", "Marie", "Marilyn", "Mario", "Mark", "Martha", "Martin", "Marvin",
    "Mary", "Mason", "Matt", "Matthew", "Maya", "Megan", "Melanie", "Melissa", "Mia", "Michael",
    "Michelle", "Miguel", "Mike", "Mila", "Miles", "Mohammed", "Molly", "Monica", "Nancy",
    "Naomi", "Natalie", "Nathan", "Neil", "Nick", "Nicholas", "Nicole", "Nina", "Noah", "Nora",
    "Norman", "Olivia", "Omar", "Oscar", "Owen", "Pablo", "Pamela", "Patricia", "Patrick", "Paul",
    "Paula", "Pedro", "Peggy", "Penny", "Peter", "Philip", "Phillip", "Priya", "Rachel", "Rafael",
    "Ralph", "Randy", "Raj", "Raymond", "Rebecca", "Regina", "Rhonda", "Ricardo", "Richard",
    "Rick", "Riley", "Rita", "Rob", "Robert", "Roberto", "Robin", "Roger", "Ron", "Ronald",
    "Rosa", "Rose", "Ross", "Roy", "Ruby", "Russell", "Ruth", "Ryan", "Sally", "Sam", "Samantha",
    "Samuel", "Sandra", "Sara", "Sarah", "Scott", "Sean", "Sergio", "Seth", "Shannon", "Sharon",
    "Shawn", "Sheila", "Shirley", "Simon", "Sofia", "Sophia", "Sophie", "Stacy", "Stanley",
    "Stephanie", "Stephen", "Steve", "Steven", "Susan", "Suzanne", "Sydney", "Tamara", "Tammy",
    "Tanya", "Tara", "Taylor", "Teresa", "Terry", "Theresa", "Thomas", "Tiffany", "Tim",
    "Timothy", "Tina", "Todd", "Tom", "Tommy", "Tony", "Tracy", "Travis", "Trevor", "Tyler",
    "Valerie", "Vanessa", "Vera", "Veronica", "Victor", "Victoria", "Vincent", "Virginia",
    "Walter", "Wanda", "Wayne", "Wendy", "Will", "William", "Willie", "Xavier", "Yolanda",
    "Yusuf", "Zach", "Zachary", "Zoe",
];

static NAMES: Lazy<HashSet<&'static str>> = Lazy::new(|| FIRST_NAMES.iter().copied().collect());

/// True if `word` (exact case) is a known first name.
pub fn is_first_name(word: &str) -> bool {
    NAMES.contains(word)
}
